//! Chat endpoint: one question, one generation call, no retry.

use api_types::chat::{ChatAsk, ChatReply};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn ask(
    State(state): State<ServerState>,
    Json(payload): Json<ChatAsk>,
) -> Result<Json<ChatReply>, ServerError> {
    if payload.question.trim().is_empty() {
        return Err(ServerError::Generic("question is required".to_string()));
    }
    let Some(advisor) = state.advisor.clone() else {
        return Err(ServerError::Unavailable(
            "chat is not configured".to_string(),
        ));
    };

    // Snapshot is read before the call; a failed generation leaves the
    // stored collection untouched.
    let records = state.store.read().await.load()?;

    match advisor.ask(&records, &payload.question).await {
        Ok(reply) => Ok(Json(ChatReply { reply })),
        Err(err) => {
            tracing::error!("generation failed: {err}");
            Err(ServerError::UpstreamFailed("generation failed".to_string()))
        }
    }
}
