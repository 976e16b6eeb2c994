//! Error types for the generation boundary
//!
//! - [`BackendError`]: the external call itself failed
//! - [`GenerationError`]: the call returned nothing usable
//!
//! Every variant is recoverable from the pipeline's point of view: all of
//! them route to the fallback synthesizer.

/// Failure of the external backend call
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Backend is not configured (e.g. missing API key)
    #[error("backend not configured: {0}")]
    Configuration(String),

    /// Request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status
    #[error("backend returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Backend answer was not in the expected envelope
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// Backend is unavailable by construction (offline mode, test fakes)
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Generation client failures
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Response had no text block
    #[error("backend response contained no text content")]
    NoTextContent,

    /// No balanced JSON object in the text, or it failed strict parsing
    #[error("unparsable content: {0}")]
    UnparsableContent(String),

    /// External call failed
    #[error("backend failed: {0}")]
    Backend(#[from] BackendError),

    /// Enclosing caller gave up waiting
    #[error("generation timed out after {after_secs}s")]
    TimedOut { after_secs: u64 },
}

impl GenerationError {
    /// Short label for logs and operability records
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoTextContent => "no_text_content",
            Self::UnparsableContent(_) => "unparsable_content",
            Self::Backend(_) => "backend_error",
            Self::TimedOut { .. } => "timed_out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_error_display() {
        let err = GenerationError::UnparsableContent("no JSON object found".into());
        assert!(err.to_string().contains("unparsable content"));
        assert_eq!(err.kind(), "unparsable_content");
    }

    #[test]
    fn backend_error_converts() {
        let err: GenerationError = BackendError::Http {
            status: 529,
            body: "overloaded".into(),
        }
        .into();
        assert_eq!(err.kind(), "backend_error");
        assert!(err.to_string().contains("HTTP 529"));
    }

    #[test]
    fn timeout_kind() {
        assert_eq!(GenerationError::TimedOut { after_secs: 90 }.kind(), "timed_out");
        assert_eq!(GenerationError::NoTextContent.kind(), "no_text_content");
    }
}
