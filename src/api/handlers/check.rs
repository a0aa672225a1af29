use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::api::extract::ApiJson;
use crate::errors::AppError;
use crate::intelligence::check_candidate;
use crate::models::CandidateReport;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    pub candidate: String,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResult {
    pub suspicious: bool,
}

/// POST /api/check — full verdict for one UPI ID or link.
///
/// Short input is not an error: it comes back as an `unknown` verdict.
pub async fn check(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CheckRequest>,
) -> Json<ApiResponse<CandidateReport>> {
    let candidate = body.candidate.trim();
    let report = check_candidate(candidate, &state.gateway).await;

    tracing::info!(
        status = %report.verdict.status,
        location_alert = report.location_alert,
        "Candidate checked"
    );

    Json(ApiResponse::ok(report))
}

/// POST /api/classify — classifier signal alone.
pub async fn classify(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ClassifyRequest>,
) -> Result<Json<ApiResponse<ClassifyResult>>, AppError> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("text must not be empty".into()));
    }

    let suspicious = crate::classify_text(text, &state.gateway).await;
    Ok(Json(ApiResponse::ok(ClassifyResult { suspicious })))
}
