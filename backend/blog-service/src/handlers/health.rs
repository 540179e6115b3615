/// Root acknowledgement and database diagnostics
use super::AppState;
use crate::services::{diagnose, DiagnosticReport};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service is running", body = MessageResponse))
)]
pub async fn read_root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Blog CMS Backend running".to_string(),
    })
}

/// Report backend and database status. Never fails.
#[utoipa::path(
    get,
    path = "/test",
    tag = "Health",
    responses((status = 200, description = "Diagnostic status", body = DiagnosticReport))
)]
pub async fn test_database(state: web::Data<AppState>) -> HttpResponse {
    let report = diagnose(state.store.as_deref(), state.database_url_set).await;
    HttpResponse::Ok().json(report)
}
