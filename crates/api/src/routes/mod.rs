//! Route definitions.

pub mod health;

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Service info served at `/`.
#[derive(Serialize)]
pub struct ServiceInfo {
    /// Service name.
    pub name: &'static str,
    /// Service version.
    pub version: &'static str,
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Tavola API",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Routes mounted at the server root.
pub fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    health::routes()
}
