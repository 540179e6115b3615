/// HTTP handlers for blog endpoints
///
/// This module contains handlers for:
/// - Health: static root acknowledgement and database diagnostics
/// - Categories: create and list
/// - Posts: create, list with filters, get by slug
/// - Admin: placeholder credential check
pub mod admin;
pub mod categories;
pub mod health;
pub mod posts;

use crate::config::AdminConfig;
use crate::db::DocumentStore;
use crate::error::{AppError, Result};
use crate::openapi::ApiDoc;
use actix_web::web;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    /// Document store, absent when no database is configured
    pub store: Option<Arc<dyn DocumentStore>>,
    pub admin: AdminConfig,
    /// Whether a database location was provided in the environment
    pub database_url_set: bool,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, admin: AdminConfig, database_url_set: bool) -> Self {
        Self {
            store,
            admin,
            database_url_set,
        }
    }

    /// The configured store, or an internal error when there is none.
    pub fn store(&self) -> Result<Arc<dyn DocumentStore>> {
        self.store
            .clone()
            .ok_or_else(|| AppError::Database("Database not configured".to_string()))
    }
}

/// Register every route and extractor configuration.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", ApiDoc::openapi()))
    .route("/", web::get().to(health::read_root))
    .route("/test", web::get().to(health::test_database))
    .service(
        web::scope("/api")
            .service(
                web::resource("/categories")
                    .route(web::post().to(categories::create_category))
                    .route(web::get().to(categories::list_categories)),
            )
            .service(
                web::resource("/posts")
                    .route(web::post().to(posts::create_post))
                    .route(web::get().to(posts::list_posts)),
            )
            .service(web::resource("/posts/{slug}").route(web::get().to(posts::get_post)))
            .route("/admin/login", web::post().to(admin::admin_login)),
    );
}
