/// Blog Service Library
///
/// Content-management backend for a small blog: categories, posts and a
/// placeholder admin login, stored in a document database.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and the route table
/// - `models`: Request/response records and stored-document mapping
/// - `services`: Business logic (slug checks, publish stamping, filters)
/// - `db`: Document store abstraction with MongoDB and in-memory backends
/// - `error`: Error types and HTTP conversion
/// - `config`: Configuration management
/// - `middleware`: Cross-origin policy construction
/// - `openapi`: OpenAPI document for the HTTP surface
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use handlers::{configure_routes, AppState};
