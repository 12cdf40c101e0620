//! Transport-neutral failure shared by the Appwrite adapters.
//!
//! Requests fail in the same handful of ways whichever port issued them, so
//! the connection reports an [`HttpFailure`] and each adapter folds it into
//! its own port error.

use reqwest::StatusCode;

use crate::domain::ports::{AccountGatewayError, ListingSourceError, PhotoStoreError};

const PREVIEW_CHAR_LIMIT: usize = 160;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum HttpFailure {
    Configuration(String),
    Transport(String),
    Timeout(String),
    Status { status: u16, message: String },
    Decode(String),
}

impl HttpFailure {
    pub(super) fn from_transport(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }

    pub(super) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                Self::Timeout(status_message(status, body))
            }
            _ => Self::Status {
                status: status.as_u16(),
                message: error_message(body),
            },
        }
    }
}

impl From<HttpFailure> for ListingSourceError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Configuration(message) => Self::configuration(message),
            HttpFailure::Transport(message) => Self::transport(message),
            HttpFailure::Timeout(message) => Self::timeout(message),
            HttpFailure::Status { status, message } => Self::rejected(status, message),
            HttpFailure::Decode(message) => Self::decode(message),
        }
    }
}

impl From<HttpFailure> for PhotoStoreError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Configuration(message) => Self::configuration(message),
            HttpFailure::Transport(message) | HttpFailure::Timeout(message) => {
                Self::transport(message)
            }
            HttpFailure::Status { status, message } => Self::rejected(status, message),
            HttpFailure::Decode(message) => Self::decode(message),
        }
    }
}

impl From<HttpFailure> for AccountGatewayError {
    fn from(failure: HttpFailure) -> Self {
        match failure {
            HttpFailure::Configuration(message) => Self::configuration(message),
            HttpFailure::Transport(message) | HttpFailure::Timeout(message) => {
                Self::transport(message)
            }
            HttpFailure::Status {
                status: 401,
                message: _,
            } => Self::no_session(),
            HttpFailure::Status { status, message } => Self::rejected(status, message),
            HttpFailure::Decode(message) => Self::decode(message),
        }
    }
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

/// Prefer the backend's own `message` field; fall back to a body preview.
fn error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| body_preview(body))
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
