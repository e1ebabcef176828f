//! OnlineJudge - Application Entry Point
//!
//! This is the main entry point for the OnlineJudge server.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onlinejudge::{
    config::CONFIG,
    db::{self, PgStore},
    handlers,
    queue::RedisQueue,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OnlineJudge server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Initialize the judge queue client
    tracing::info!("Connecting to Redis...");
    let queue = RedisQueue::connect(&CONFIG.redis.url, &CONFIG.dispatch).await?;

    // Create application state
    let state = AppState::new(
        Arc::new(PgStore::new(db_pool)),
        Arc::new(queue),
        CONFIG.clone(),
    );

    // Build the router
    let app = handlers::app(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
