use axum::http::Method;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fyyur_db::AppState;
use fyyur_migration::MigratorTrait;
use fyyur_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let db_config = fyyur_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = fyyur_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    tracing::info!("running database migrations...");
    fyyur_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let config = ServerConfig::from_env();
    let cors = if config.cors_origins.is_empty() {
        tracing::warn!("CORS_ORIGINS not set, cross-origin requests will be refused");
        CorsLayer::new()
    } else {
        tracing::info!("CORS allowed origins: {:?}", config.cors_origins);
        CorsLayer::new()
            .allow_origin(config.cors_origins.clone())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };

    let app = fyyur_server::router(Arc::new(AppState { db })).layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind listener");
    tracing::info!(addr = %config.bind_addr, "server started");

    axum::serve(listener, app).await.expect("server error");
}
