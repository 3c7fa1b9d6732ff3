//! Feature-request relay: forwards a free-text message to a fixed
//! destination through a form-forwarding endpoint. Success or failure only,
//! no queueing and no delivery guarantee.

use api_types::feature::{FeatureRequestAck, FeatureRequestNew};
use axum::{Json, extract::State};
use reqwest::{Client, StatusCode};
use serde::Serialize;

use crate::{ServerError, server::ServerState};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("relay answered {0}")]
    Status(StatusCode),
}

#[derive(Serialize)]
struct RelayBody<'a> {
    message: &'a str,
    #[serde(rename = "_replyto", skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct FeatureRelay {
    client: Client,
    forward_url: String,
    reply_to: Option<String>,
}

impl FeatureRelay {
    pub fn new(client: Client, forward_url: String, reply_to: Option<String>) -> Self {
        Self {
            client,
            forward_url,
            reply_to,
        }
    }

    async fn send(&self, message: &str) -> Result<(), RelayError> {
        let resp = self
            .client
            .post(&self.forward_url)
            .header("Accept", "application/json")
            .json(&RelayBody {
                message,
                reply_to: self.reply_to.as_deref(),
            })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(RelayError::Status(status))
    }
}

pub async fn request(
    State(state): State<ServerState>,
    Json(payload): Json<FeatureRequestNew>,
) -> Result<Json<FeatureRequestAck>, ServerError> {
    if payload.message.trim().is_empty() {
        return Err(ServerError::Generic("message is required".to_string()));
    }
    let Some(relay) = state.relay.clone() else {
        return Err(ServerError::Unavailable(
            "feature requests are not configured".to_string(),
        ));
    };

    match relay.send(&payload.message).await {
        Ok(()) => Ok(Json(FeatureRequestAck { success: true })),
        Err(err) => {
            tracing::error!("feature request relay failed: {err}");
            Err(ServerError::UpstreamFailed(
                "failed to send feature request".to_string(),
            ))
        }
    }
}
