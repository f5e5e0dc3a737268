//! Settings API endpoints - JSON API

use crate::AppState;
use amlweb_config::Config;
use axum::extract::State;
use axum::Json;

pub async fn api_settings(State(state): State<AppState>) -> Json<Config> {
    Json(state.config.clone())
}
