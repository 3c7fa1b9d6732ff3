use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use store::StoreError;

use serde::Serialize;
pub use feature::FeatureRelay;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod chat;
mod expenses;
mod feature;
mod report;
mod server;

pub enum ServerError {
    Engine(EngineError),
    Store(StoreError),
    NotFound(String),
    Unavailable(String),
    UpstreamFailed(String),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ServerError::Store(err) => {
                tracing::error!("store error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::NotFound(err) => (StatusCode::NOT_FOUND, err),
            ServerError::Unavailable(err) => (StatusCode::SERVICE_UNAVAILABLE, err),
            ServerError::UpstreamFailed(err) => (StatusCode::BAD_GATEWAY, err),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<StoreError> for ServerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
