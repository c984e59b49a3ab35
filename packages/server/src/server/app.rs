//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{health_handler, process_document_handler};

/// Scanned audit documents routinely exceed the axum body default.
const MAX_DOCUMENT_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(server_deps: ServerDeps) -> Router {
    let app_state = AppState {
        server_deps: Arc::new(server_deps),
    };

    Router::new()
        .route("/reports", post(process_document_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_DOCUMENT_BYTES))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
}
