use crate::error::ErrorResponse;
use crate::handlers::{admin, categories, health, posts};
use crate::models::{
    BlogPostResponse, CategoryResponse, CreateCategoryRequest, CreatePostRequest, CreatedResponse,
    LoginRequest, LoginResponse,
};
use crate::services::DiagnosticReport;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog CMS API",
        version = "0.1.0",
        description = "Categories, posts and admin login for a small blog"
    ),
    paths(
        health::read_root,
        health::test_database,
        categories::create_category,
        categories::list_categories,
        posts::create_post,
        posts::list_posts,
        posts::get_post,
        admin::admin_login,
    ),
    components(schemas(
        health::MessageResponse,
        DiagnosticReport,
        CreateCategoryRequest,
        CategoryResponse,
        CreatePostRequest,
        BlogPostResponse,
        CreatedResponse,
        LoginRequest,
        LoginResponse,
        ErrorResponse,
    )),
    tags(
        (name = "Health", description = "Liveness and database diagnostics"),
        (name = "Categories", description = "Blog categories"),
        (name = "Posts", description = "Blog posts"),
        (name = "Admin", description = "Admin login placeholder"),
    )
)]
pub struct ApiDoc;
