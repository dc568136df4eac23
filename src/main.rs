use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::sync::Arc;
use store_directory::auth::delegate::LoginDelegate;
use store_directory::auth::handlers::{handle_login, handle_register};
use store_directory::auth::users::UserDirectory;
use store_directory::config::Config;
use store_directory::reviews::handlers::handle_add_review;
use store_directory::search::handlers::{SearchLimit, handle_near, handle_search};
use store_directory::stores::handlers::*;
use store_directory::stores::service::StoreService;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;
    tracing::info!(
        "Starting store directory on {} (slug policy: {}, search limit: {})",
        config.bind,
        config.slug_policy,
        config.search_limit
    );

    // 1. State:
    let stores = StoreService::new(config.slug_policy);
    let users = Arc::new(UserDirectory::new());
    let login = Arc::new(LoginDelegate::new(users.clone()));
    tracing::info!("Login strategy: {}", login.strategy_name());

    // 2. HTTP Router:
    let app = Router::new()
        .route("/api/stores", get(handle_list_stores).post(handle_create_store))
        .route("/api/stores/:id", axum::routing::put(handle_update_store))
        .route("/api/store/:slug", get(handle_get_store))
        .route("/store/:slug", get(handle_get_store))
        .route("/api/tags", get(handle_tags))
        .route("/api/tags/:tag", get(handle_stores_by_tag))
        .route("/api/top", get(handle_top_stores))
        .route("/api/search", get(handle_search))
        .route("/api/search/", get(handle_search))
        .route("/api/near", get(handle_near))
        .route("/api/reviews/:store_id", post(handle_add_review))
        .route("/register", post(handle_register))
        .route("/login", post(handle_login))
        .layer(Extension(stores))
        .layer(Extension(users))
        .layer(Extension(login))
        .layer(Extension(SearchLimit(config.search_limit)));

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
