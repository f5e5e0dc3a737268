//! Report API endpoints - Plain-text downloads

use crate::{ApiError, AppState};
use amlweb_core::SarReport;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;

/// Download the SAR report for a held transaction
pub async fn api_transaction_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state.dashboard.read().await.snapshot();
    let transaction = snapshot.find(id).ok_or(ApiError::NotFound {
        resource: format!("Transaction {}", id),
    })?;

    let report = SarReport::new(transaction);
    let disposition = format!("attachment; filename=\"{}\"", report.file_name());
    log::info!("Generated SAR report for transaction {}", id);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.render(),
    ))
}
