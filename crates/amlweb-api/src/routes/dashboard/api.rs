//! Dashboard API endpoints - JSON API
//!
//! Endpoints:
//! - api_transactions: Current dashboard state with all held transactions
//! - api_transaction_detail: First held transaction with the given id
//! - api_remount: Dispose of the dashboard and mount a fresh one

use std::sync::Arc;

use crate::{ApiError, AppState};
use amlweb_core::{Dashboard, ErrorDetails, Transaction};
use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Dashboard state as exposed over JSON
#[derive(Debug, Serialize)]
pub struct TransactionsResponse {
    pub status: String,
    pub transactions: Vec<Transaction>,
    pub total_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub error: Option<ErrorDetails>,
}

/// Get the held transactions (JSON API)
pub async fn api_transactions(State(state): State<AppState>) -> Json<TransactionsResponse> {
    let snapshot = state.dashboard.read().await.snapshot();
    Json(TransactionsResponse {
        status: snapshot.status.to_string(),
        total_count: snapshot.transactions.len(),
        error: snapshot.error().map(|e| e.to_details()),
        loaded_at: snapshot.loaded_at,
        transactions: snapshot.transactions,
    })
}

/// Get single transaction detail (JSON API)
pub async fn api_transaction_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>, ApiError> {
    let snapshot = state.dashboard.read().await.snapshot();
    snapshot.find(id).cloned().map(Json).ok_or(ApiError::NotFound {
        resource: format!("Transaction {}", id),
    })
}

/// Remount the dashboard, issuing one new fetch
pub async fn api_remount(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut dashboard = state.dashboard.write().await;
    dashboard.unmount();

    let mut fresh = Dashboard::new();
    fresh.mount(Arc::clone(&state.source));
    *dashboard = fresh;
    log::info!("Dashboard remounted");

    Json(serde_json::json!({ "success": true, "message": "Dashboard remounted" }))
}
