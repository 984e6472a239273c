use thiserror::Error;

/// Longest raw-response excerpt carried inside a [`ParseError::Malformed`].
pub const SNIPPET_LIMIT: usize = 200;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid preferences: {0}")]
    InvalidPreferences(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("AI service error: {0}")]
    Api(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// True for failures of the external AI call (network, quota, timeout, API).
    /// These are recovered by substituting the fallback itinerary.
    pub fn is_external_failure(&self) -> bool {
        matches!(
            self,
            PlannerError::Http(_)
                | PlannerError::Api(_)
                | PlannerError::RateLimit { .. }
                | PlannerError::Timeout(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidPreferences(_) => "INVALID_PREFERENCES",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Api(_) => "API_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Csv(_) => "CSV_ERROR",
            PlannerError::Io(_) => "IO_ERROR",
            PlannerError::Unknown(_) => "UNKNOWN_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "fallback": self.is_external_failure()
            }
        })
    }
}

/// Failure to turn a raw AI response into a validated itinerary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not decodable as JSON after fence stripping. Carries a raw snippet.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Decodable, but the itinerary shape or ranges are wrong.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

impl ParseError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ParseError::Malformed(_) => "MALFORMED_RESPONSE",
            ParseError::SchemaViolation(_) => "SCHEMA_VIOLATION",
        }
    }
}

/// Cut `text` down to [`SNIPPET_LIMIT`] characters on a char boundary.
pub(crate) fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
