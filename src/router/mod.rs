use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::di::ServiceContainer;
use crate::handlers::{
    handle_confirm_transaction, handle_create_token_transaction, handle_health,
    handle_upload_image,
};

/// Browser origins allowed by `FRONTEND_URL`. Without any configured origin
/// every origin is accepted.
fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let allow_origin = if origins.is_empty() {
        warn!("FRONTEND_URL is not set, accepting requests from any origin");
        AllowOrigin::from(Any)
    } else {
        let values = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid origin in FRONTEND_URL: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        info!("Allowed origins: {:?}", origins);
        AllowOrigin::list(values)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Build the HTTP API around a service container.
pub fn create_router(services: Arc<ServiceContainer>) -> Result<Router> {
    let config = services.config();
    let cors = cors_layer(&config.allowed_origins())?;
    let body_limit = DefaultBodyLimit::max(config.max_upload_bytes);

    Ok(Router::new()
        .route("/", get(handle_health))
        .route("/api/upload-image", post(handle_upload_image))
        .route(
            "/api/create-token-transaction",
            post(handle_create_token_transaction),
        )
        .route("/api/confirm-transaction", post(handle_confirm_transaction))
        .layer(body_limit)
        .layer(cors)
        .with_state(services))
}
