/// Post handlers - HTTP endpoints for post operations
use super::AppState;
use crate::error::{AppError, ErrorResponse, Result};
use crate::models::{BlogPostResponse, CreatePostRequest, CreatedResponse, ListPostsQuery};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use validator::Validate;

fn log_storage_failure(action: &'static str) -> impl Fn(&AppError) {
    move |e: &AppError| {
        if matches!(e, AppError::Database(_) | AppError::Internal(_)) {
            tracing::error!(error = %e, "{} failed", action);
        }
    }
}

/// Create a new post
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 200, description = "Post created", body = CreatedResponse),
        (status = 400, description = "Slug already exists", body = ErrorResponse),
        (status = 422, description = "Malformed payload", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new(state.store()?);
    let id = service
        .create_post(req.into_inner())
        .await
        .inspect_err(log_storage_failure("Post creation"))?;

    Ok(HttpResponse::Ok().json(CreatedResponse { id }))
}

/// List posts, optionally filtered by category, tag or search text
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Matching posts", body = [BlogPostResponse]),
        (status = 422, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let service = PostService::new(state.store()?);
    let posts = service
        .list_posts(&query)
        .await
        .inspect_err(log_storage_failure("Post listing"))?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by slug
#[utoipa::path(
    get,
    path = "/api/posts/{slug}",
    tag = "Posts",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "The post", body = BlogPostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn get_post(state: web::Data<AppState>, slug: web::Path<String>) -> Result<HttpResponse> {
    let service = PostService::new(state.store()?);
    let post = service
        .get_post_by_slug(&slug)
        .await
        .inspect_err(log_storage_failure("Post lookup"))?;

    Ok(HttpResponse::Ok().json(post))
}
