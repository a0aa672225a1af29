use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::ApiResponse;
use crate::api::extract::ApiJson;
use crate::errors::AppError;
use crate::intelligence::assistant::{assistant_reply, GREETING};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// GET /api/chat/greeting — opening line for a new conversation.
pub async fn greeting() -> Json<ApiResponse<ChatReply>> {
    Json(ApiResponse::ok(ChatReply {
        reply: GREETING.to_string(),
    }))
}

/// POST /api/chat — one assistant turn.
pub async fn reply(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Json<ApiResponse<ChatReply>>, AppError> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("message must not be empty".into()));
    }

    let reply = assistant_reply(message, &state.gateway).await;
    Ok(Json(ApiResponse::ok(ChatReply { reply })))
}
