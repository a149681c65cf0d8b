use thiserror::Error;

/// Top-level error type for Pulso.
#[derive(Debug, Error)]
pub enum PulsoError {
    /// Transport-level failure talking to the completion API (connect, timeout, decode).
    #[error("provider error: {0}")]
    Provider(String),

    /// The completion API answered with a non-success status or an error envelope.
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The inbound request is missing or has malformed fields.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PulsoError {
    /// Whether the failure is a caller mistake rather than a server-side problem.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = PulsoError::from(io_err);
        let display = format!("{err}");
        assert!(
            display.contains("io error"),
            "expected 'io error' in display, got: {display}"
        );
        assert!(
            display.contains("file missing"),
            "expected 'file missing' in display, got: {display}"
        );
    }

    #[test]
    fn test_upstream_error_display() {
        let err = PulsoError::Upstream {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(format!("{err}"), "upstream error (429): rate limited");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_request_is_client_error() {
        let err = PulsoError::InvalidRequest("messages is required".into());
        assert_eq!(format!("{err}"), "invalid request: messages is required");
        assert!(err.is_client_error());
    }
}
