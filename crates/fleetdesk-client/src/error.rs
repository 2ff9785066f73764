//! Client error types and banner message extraction

use std::error::Error as StdError;

use fleetdesk_types::NormalizeError;
use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Shown whenever an error carries no server-provided message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-reqwest transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// 401 that the refresh protocol could not recover from
    #[error("Authentication required")]
    Unauthorized { body: Option<Value> },

    /// Any other non-success status
    #[error("Request failed with status {status}")]
    Status {
        status: StatusCode,
        body: Option<Value>,
    },

    /// Response did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] NormalizeError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API offers no endpoint for this operation
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// `message` (or `error`) string of a structured server response.
pub fn message_from_body(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Message the server put in its response, if any.
    pub fn server_message(&self) -> Option<String> {
        match self {
            ClientError::Unauthorized { body: Some(body) }
            | ClientError::Status {
                body: Some(body), ..
            } => message_from_body(body),
            ClientError::InvalidResponse(NormalizeError::Rejected(message)) => message.clone(),
            _ => None,
        }
    }
}

/// Banner text for any error: the first server-provided message found along
/// the source chain, otherwise [`FALLBACK_ERROR_MESSAGE`].
pub fn error_message(err: &(dyn StdError + 'static)) -> String {
    std::iter::successors(Some(err), |&e| e.source())
        .filter_map(|e| e.downcast_ref::<ClientError>())
        .find_map(ClientError::server_message)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}
