use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use blog_service::config::Config;
use blog_service::db::{DocumentStore, InMemoryStore, MongoStore};
use blog_service::middleware::build_cors;
use blog_service::{configure_routes, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,mongodb=warn".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Option<Arc<dyn DocumentStore>>> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; data endpoints will fail until a database is configured");
        return Ok(None);
    };

    if config.database.is_memory() {
        let name = config.database.resolve_name(None);
        tracing::warn!(database = %name, "Using in-memory document store; data is not persisted");
        return Ok(Some(Arc::new(InMemoryStore::for_blog(name))));
    }

    let store = MongoStore::connect(url, &config.database)
        .await
        .context("Failed to initialize MongoDB client")?;

    // An unreachable server at startup is not fatal; requests report it.
    if let Err(e) = store.ensure_indexes().await {
        tracing::warn!(error = %e, "Could not ensure post slug index");
    }

    Ok(Some(Arc::new(store)))
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Blog Service
///
/// # Routes
///
/// - `/` and `/test` - Root acknowledgement and database diagnostics
/// - `/api/categories` - Create and list categories
/// - `/api/posts`, `/api/posts/{slug}` - Create, list and fetch posts
/// - `/api/admin/login` - Admin credential check
/// - `/docs/`, `/openapi.json` - API documentation
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    if config.cors.is_permissive_with_credentials() {
        tracing::warn!(
            "CORS allows any origin with credentials; set CORS_ALLOWED_ORIGINS to restrict it"
        );
    }

    let store = open_store(&config).await?;
    let state = web::Data::new(AppState::new(
        store,
        config.admin.clone(),
        config.database.url.is_some(),
    ));

    let bind_address = config.bind_address();
    let cors_config = config.cors.clone();

    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(build_cors(&cors_config))
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(configure_routes)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    let handle = server.handle();
    let server_task = tokio::spawn(server);

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping HTTP server");
    handle.stop(true).await;

    server_task
        .await
        .context("HTTP server task panicked")?
        .context("HTTP server error")?;

    tracing::info!("blog-service stopped");
    Ok(())
}
