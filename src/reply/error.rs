use thiserror::Error;

/// Everything that can go wrong while turning an inquiry into a reply.
///
/// The variants are kept apart for logging only; the controller shows the
/// same recovery message for all of them.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no Gemini API key configured (run `reply-pro --setup` or set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("request to the generation service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("generation service returned no text")]
    EmptyPayload,

    #[error("generated payload is not valid JSON: {0}")]
    MalformedPayload(String),

    #[error("generated payload violates the reply schema: {0}")]
    SchemaViolation(String),

    #[error("generation task ended unexpectedly: {0}")]
    Interrupted(String),
}

impl GenerationError {
    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingApiKey => "missing_api_key",
            GenerationError::Transport(_) => "transport",
            GenerationError::Status { .. } => "status",
            GenerationError::EmptyPayload => "empty_payload",
            GenerationError::MalformedPayload(_) => "malformed_payload",
            GenerationError::SchemaViolation(_) => "schema_violation",
            GenerationError::Interrupted(_) => "interrupted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels_are_distinct() {
        let errors = [
            GenerationError::MissingApiKey,
            GenerationError::Status {
                status: 500,
                body: String::new(),
            },
            GenerationError::EmptyPayload,
            GenerationError::MalformedPayload("eof".into()),
            GenerationError::SchemaViolation("emailSubject".into()),
            GenerationError::Interrupted("panic".into()),
        ];
        let mut kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_status_message_includes_code() {
        let err = GenerationError::Status {
            status: 429,
            body: "quota".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("quota"));
    }
}
