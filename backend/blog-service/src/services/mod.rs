/// Business logic layer
///
/// - `posts`: slug checks, publish stamping and list filters
/// - `categories`: category creation and listing
/// - `admin`: placeholder admin credential check
/// - `diagnostics`: guarded probes reported by the `/test` endpoint
pub mod admin;
pub mod categories;
pub mod diagnostics;
pub mod posts;

pub use admin::verify_admin;
pub use categories::CategoryService;
pub use diagnostics::{diagnose, DiagnosticReport};
pub use posts::{build_post_filter, PostService};
