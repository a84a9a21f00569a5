//! Tavola API Server
//!
//! Launcher for the backend service: builds the runtime with the
//! configured worker count, binds the configured address, and serves
//! the router. Workers share nothing but the database; schema changes
//! are a deploy step (`migrator migrate`) that must complete before the
//! server is (re)started.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tavola_api::{AppState, create_router};
use tavola_db::connect;
use tavola_shared::AppConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tavola=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Worker count comes from the deployment descriptor (default 4)
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers)
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    if !config.payment.is_configured() {
        warn!("STRIPE_SECRET_KEY not set; payment flows are disabled");
    }

    // Create application state and router
    let state = AppState { db: Arc::new(db) };
    let app = create_router(state, &config.cors)?;

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(workers = config.server.workers, "Server listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
