//! HTTP layer shell: application state, router, and CORS policy.
//!
//! The request-handling services (catalogue, auth, checkout, uploads)
//! are separate deliverables; this crate provides the router the
//! launcher serves: liveness routes, request tracing, and CORS locked
//! to the two configured frontend origins.

pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use tavola_shared::config::CorsConfig;
use tavola_shared::{AppError, AppResult};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
}

/// Creates the main application router.
///
/// # Errors
///
/// Returns a validation error if a configured CORS origin is not a
/// valid header value.
pub fn create_router(state: AppState, cors: &CorsConfig) -> AppResult<Router> {
    Ok(Router::new()
        .merge(routes::root_routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors)?)
        .with_state(state))
}

/// CORS layer allowing exactly the storefront and admin origins.
///
/// Credentials are allowed, so methods and headers must be explicit
/// lists; wildcards cannot be combined with credentials.
fn cors_layer(cors: &CorsConfig) -> AppResult<CorsLayer> {
    let mut origins = Vec::with_capacity(2);
    for origin in cors.origins() {
        let value = HeaderValue::from_str(origin)
            .map_err(|_| AppError::Validation(format!("invalid CORS origin: {origin}")))?;
        origins.push(value);
    }

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_accepts_valid_origins() {
        let cors = CorsConfig {
            frontend_origin: "https://shop.example.com".into(),
            admin_origin: "https://admin.example.com".into(),
        };
        assert!(cors_layer(&cors).is_ok());
    }

    #[test]
    fn test_cors_layer_rejects_invalid_origin() {
        let cors = CorsConfig {
            frontend_origin: "https://shop.example.com\n".into(),
            admin_origin: "https://admin.example.com".into(),
        };
        let result = cors_layer(&cors);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
