/// Admin login handler
use super::AppState;
use crate::error::{ErrorResponse, Result};
use crate::models::{LoginRequest, LoginResponse};
use crate::services::verify_admin;
use actix_web::{web, HttpResponse};

/// Check admin credentials against the configured pair
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "Admin",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials match", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn admin_login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let resp = verify_admin(&state.admin, &req)?;
    Ok(HttpResponse::Ok().json(resp))
}
