//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Transactions dashboard page and JSON endpoints
//! - routes::reports: Suspicious activity report downloads
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;

use amlweb_config::Config;
use amlweb_core::{Dashboard, TransactionSource};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<RwLock<Dashboard>>,
    pub source: Arc<dyn TransactionSource>,
    pub config: Config,
}

impl AppState {
    /// Build the state and mount the dashboard, starting its fetch.
    ///
    /// Must be called within a tokio runtime.
    pub fn mount(config: Config, source: Arc<dyn TransactionSource>) -> Self {
        let mut dashboard = Dashboard::new();
        dashboard.mount(Arc::clone(&source));
        Self {
            dashboard: Arc::new(RwLock::new(dashboard)),
            source,
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::dashboard::{api_remount, api_transaction_detail, api_transactions, page_dashboard};
    use routes::reports::api_transaction_report;
    use routes::settings::api_settings;

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/:id", get(api_transaction_detail))
        .route("/api/transactions/:id/report", get(api_transaction_report))
        .route("/api/dashboard/remount", post(api_remount))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - AML Admin</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-900 text-white">
    {}
</body>
</html>"#,
        amlweb_utils::escape_html(title),
        content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='min-h-screen p-6'>{}</main>"#, inner_content)
    } else {
        base_html(
            title,
            &format!(r#"<main class='bg-gray-900 text-white min-h-screen p-6'>{}</main>"#, inner_content),
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is
/// interrupted.
pub async fn start_server(state: AppState) -> std::io::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting amlweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Transactions dashboard)");
    log::info!("  - /api/transactions (JSON)");
    log::info!("  - /api/transactions/:id/report (SAR report)");
    log::info!("  - /api/dashboard/remount (POST, refetch)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
