//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::error::ApiError;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::Method,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};

/// Create the main application router
///
/// Routes:
///   - GET  /                    - Health check
///   - GET  /health              - Health check
///   - POST /api/create-order    - Create a gateway order
///   - POST /api/verify-payment  - Verify a checkout signature
///
/// Anything else, including a known path with the wrong method, is a 404.
/// Bodies are parsed before routing, so malformed JSON is a 400 everywhere.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);
    let body_limit = state.config.body_limit;

    Router::new()
        // Health check at root
        .route("/", get(handlers::health).fallback(handlers::not_found))
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        // Payments
        .route(
            "/api/create-order",
            post(handlers::create_order).fallback(handlers::not_found),
        )
        .route(
            "/api/verify-payment",
            post(handlers::verify_payment).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        // Middleware (outermost last)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(middleware::from_fn(log_request))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        // State
        .with_state(state)
}

/// CORS restricted to the configured origins, with credentials
fn cors_layer(state: &AppState) -> CorsLayer {
    let origins = state.config.origin_header_values().unwrap_or_else(|e| {
        warn!("{:#}; CORS will reject all origins", e);
        Vec::new()
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Log every incoming request; headers only at debug level
async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri());
    debug!(headers = ?request.headers(), "request headers");

    next.run(request).await
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_panic_renders_internal_error() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
