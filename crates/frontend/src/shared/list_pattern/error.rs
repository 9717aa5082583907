use thiserror::Error;

/// Failure of a call to the LabPilot backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No usable response: connection refused, CORS, timeout
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 404, the target no longer exists
    #[error("Not found")]
    NotFound,

    /// Other HTTP 4xx rejected by backend business rules
    #[error("{0}")]
    Validation(String),

    /// Anything else (5xx, undecodable body, ...)
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Maps a non-success HTTP status and its body to the error taxonomy
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            404 => ApiError::NotFound,
            400..=499 => ApiError::Validation(
                extract_message(body).unwrap_or_else(|| format!("Request rejected ({})", status)),
            ),
            _ => ApiError::Unknown(format!("HTTP {}", status)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// Text shown to the operator
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check the connection and try again.".to_string()
            }
            ApiError::NotFound => "The record no longer exists.".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Unknown(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// `{"message": "..."}`, `{"error": "..."}` or a short plain-text body
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return ["message", "error", "msg"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .filter(|m| !m.trim().is_empty());
    }
    if trimmed.len() <= 200 && !trimmed.starts_with('<') {
        return Some(trimmed.to_string());
    }
    None
}
