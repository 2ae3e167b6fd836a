use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::record::RecordKind;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("API responded with {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// An update was requested for a record that has no id.
    #[error("Record has no id")]
    MissingId,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status,
                message: None,
            }
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl ApiError {
    /// Banner text shown when creating a record failed.
    ///
    /// The server's own `message` wins; otherwise a generic text depending on
    /// whether the API was reachable at all.
    pub fn user_message(&self, kind: RecordKind) -> String {
        self.banner(kind, "register")
    }

    /// Banner text shown when replacing a record from the edit modal failed.
    pub fn update_message(&self, kind: RecordKind) -> String {
        self.banner(kind, "update")
    }

    fn banner(&self, kind: RecordKind, verb: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Network(_) => {
                "Could not connect to the server. Is the API running?".to_string()
            }
            _ => format!("Failed to {verb} {kind}. Please try again."),
        }
    }
}
