/// Category handlers - HTTP endpoints for category operations
use super::AppState;
use crate::error::{ErrorResponse, Result};
use crate::models::{CategoryResponse, CreateCategoryRequest, CreatedResponse};
use crate::services::CategoryService;
use actix_web::{web, HttpResponse};

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created", body = CreatedResponse),
        (status = 422, description = "Malformed payload", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn create_category(
    state: web::Data<AppState>,
    req: web::Json<CreateCategoryRequest>,
) -> Result<HttpResponse> {
    let service = CategoryService::new(state.store()?);
    let id = service
        .create_category(req.into_inner())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Category creation failed"))?;

    Ok(HttpResponse::Ok().json(CreatedResponse { id }))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = [CategoryResponse]),
        (status = 500, description = "Storage error", body = ErrorResponse)
    )
)]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse> {
    let service = CategoryService::new(state.store()?);
    let categories = service
        .list_categories()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Category listing failed"))?;

    Ok(HttpResponse::Ok().json(categories))
}
