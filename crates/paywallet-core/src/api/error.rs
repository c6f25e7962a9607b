use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request rejected{}", detail(.0))]
    BadRequest(Option<String>),

    #[error("Unauthorized - token may be expired{}", detail(.0))]
    Unauthorized(Option<String>),

    #[error("Access denied{}", detail(.0))]
    AccessDenied(Option<String>),

    #[error("Resource not found{}", detail(.0))]
    NotFound(Option<String>),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error{}", detail(.0))]
    ServerError(Option<String>),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

fn detail(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default()
}

/// Maximum length for error response bodies in log lines
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    /// Pull the backend's `message` field out of a JSON error body.
    fn server_message(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let message = Self::server_message(body);
        if message.is_none() && !body.is_empty() {
            debug!(status = %status, body = %Self::truncate_body(body), "Error response without message");
        }
        match status.as_u16() {
            401 => ApiError::Unauthorized(message),
            403 => ApiError::AccessDenied(message),
            404 => ApiError::NotFound(message),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(message),
            400..=499 => ApiError::BadRequest(message),
            _ => ApiError::InvalidResponse(format!(
                "Status {}: {}",
                status,
                message.unwrap_or_else(|| Self::truncate_body(body))
            )),
        }
    }

    /// Message to show the user: the backend's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::BadRequest(Some(m))
            | ApiError::Unauthorized(Some(m))
            | ApiError::AccessDenied(Some(m))
            | ApiError::NotFound(Some(m))
            | ApiError::ServerError(Some(m)) => m.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}
