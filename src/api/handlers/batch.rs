use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::ApiResponse;
use crate::api::extract::ApiJson;
use crate::errors::AppError;
use crate::intelligence::batch::{analyze_candidates, split_candidates};
use crate::models::BatchResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub text: String,
}

/// POST /api/batch — tally a pasted list of UPI IDs or links.
pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<BatchRequest>,
) -> Result<Json<ApiResponse<BatchResult>>, AppError> {
    let candidates = split_candidates(&body.text);
    let count = candidates.len();
    if count == 0 {
        return Err(AppError::BadRequest("no UPI IDs or links found".into()));
    }
    if count > state.config.batch_max_items {
        return Err(AppError::BadRequest(format!(
            "batch has {count} entries, limit is {}",
            state.config.batch_max_items
        )));
    }

    let result = analyze_candidates(candidates, &state.gateway).await;
    Ok(Json(ApiResponse::ok(result)))
}
