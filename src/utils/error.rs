use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Niche is required")]
    NicheRequired,

    #[error("{service} API key is not configured")]
    MissingCredential { service: &'static str },

    #[error("Upstream request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Upstream API returned status {status}")]
    UpstreamStatus { status: u16 },

    #[error("Model response did not contain any text output")]
    MalformedResponse,

    #[error("No JSON object found in model output")]
    NoJsonFound,

    #[error("Model output is not valid JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Blueprint is missing required field '{field}'")]
    IncompleteBlueprint { field: &'static str },

    #[error("Failed to generate blueprint after {attempts} attempts: {source}")]
    GenerationExhausted {
        attempts: u32,
        #[source]
        source: Box<SiteError>,
    },

    #[error("Mail delivery failed: {message}")]
    MailDeliveryError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Config,
    Upstream,
    Parse,
    Mail,
    Io,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::NicheRequired | SiteError::ValidationError { .. } => {
                ErrorCategory::Validation
            }
            SiteError::MissingCredential { .. }
            | SiteError::ConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            SiteError::TransportError(_) | SiteError::UpstreamStatus { .. } => {
                ErrorCategory::Upstream
            }
            SiteError::MalformedResponse
            | SiteError::NoJsonFound
            | SiteError::JsonParseError(_)
            | SiteError::IncompleteBlueprint { .. } => ErrorCategory::Parse,
            SiteError::GenerationExhausted { source, .. } => source.category(),
            SiteError::MailDeliveryError { .. } => ErrorCategory::Mail,
            SiteError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// Whether one more attempt against the generative API could succeed.
    /// Only configuration and input problems are final; everything an
    /// attempt itself can produce goes back through the retry loop.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Upstream | ErrorCategory::Parse
        )
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_classification() {
        assert_eq!(
            SiteError::NicheRequired.category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            SiteError::MissingCredential {
                service: "generative"
            }
            .category(),
            ErrorCategory::Config
        );
        assert_eq!(
            SiteError::UpstreamStatus { status: 503 }.category(),
            ErrorCategory::Upstream
        );
        assert_eq!(SiteError::NoJsonFound.category(), ErrorCategory::Parse);
        assert_eq!(
            SiteError::MailDeliveryError {
                message: "boom".to_string()
            }
            .category(),
            ErrorCategory::Mail
        );
    }

    #[test]
    fn test_exhaustion_inherits_source_category() {
        let err = SiteError::GenerationExhausted {
            attempts: 5,
            source: Box::new(SiteError::NoJsonFound),
        };
        assert_eq!(err.category(), ErrorCategory::Parse);
    }

    #[test]
    fn test_retryability() {
        assert!(SiteError::UpstreamStatus { status: 500 }.is_retryable());
        assert!(SiteError::MalformedResponse.is_retryable());
        assert!(SiteError::NoJsonFound.is_retryable());
        assert!(SiteError::IncompleteBlueprint { field: "aesthetic" }.is_retryable());
        assert!(!SiteError::NicheRequired.is_retryable());
        assert!(!SiteError::MissingCredential {
            service: "generative"
        }
        .is_retryable());
    }

    #[test]
    fn test_exhaustion_message_carries_last_failure() {
        let err = SiteError::GenerationExhausted {
            attempts: 5,
            source: Box::new(SiteError::UpstreamStatus { status: 429 }),
        };
        let message = err.to_string();
        assert!(message.contains("after 5 attempts"));
        assert!(message.contains("status 429"));
    }
}
