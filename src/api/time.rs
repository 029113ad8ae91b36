use super::state::ApiState;
use crate::timestamp::{ParseTimestampError, Timestamp};

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

const TEXT_PLAIN: &str = "text/plain";

/// Why a time update was rejected.
///
/// Every variant is answered with a bare 400, so clients cannot tell them
/// apart. The reason only shows up in the debug log.
#[derive(Debug, thiserror::Error)]
pub(super) enum BadRequest {
    #[error("content type must be exactly text/plain, got {0:?}")]
    ContentType(Option<String>),
    #[error("failed to read request body: {0}")]
    UnreadableBody(#[from] BytesRejection),
    #[error("request body is not UTF-8")]
    NotUtf8,
    #[error("request body is not a timestamp: {0}")]
    MalformedTimestamp(#[from] ParseTimestampError),
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "rejected time update");
        StatusCode::BAD_REQUEST.into_response()
    }
}

pub(super) async fn get_time(State(state): State<Arc<ApiState>>) -> Response {
    match state.store.get().await {
        Ok(timestamp) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, TEXT_PLAIN)],
            timestamp.to_string(),
        )
            .into_response(),
        // Only reachable while the process is shutting down.
        Err(error) => {
            tracing::warn!(%error, "time store unavailable");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

pub(super) async fn set_time(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, BadRequest> {
    let content_type = headers.get(header::CONTENT_TYPE);
    if content_type.map(|value| value.as_bytes()) != Some(TEXT_PLAIN.as_bytes()) {
        return Err(BadRequest::ContentType(content_type.map(|value| {
            String::from_utf8_lossy(value.as_bytes()).into_owned()
        })));
    }

    let body = body?;
    let text = std::str::from_utf8(&body).map_err(|_| BadRequest::NotUtf8)?;
    let timestamp: Timestamp = text.parse()?;

    state.store.set(timestamp).await;
    tracing::debug!(%timestamp, "time updated");

    Ok(StatusCode::OK)
}
