//! Error types for the BlockRun client

use thiserror::Error;

/// Result type alias for BlockRun operations
pub type Result<T> = std::result::Result<T, BlockrunError>;

/// Main error type for BlockRun operations
///
/// Callers branch on the variant: [`BlockrunError::Validation`] is raised before any
/// network call, [`BlockrunError::Payment`] covers the whole x402 handshake and
/// [`BlockrunError::Api`] carries the raw server response for any other status.
#[derive(Error, Debug)]
pub enum BlockrunError {
    /// Malformed local input
    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    /// Payment challenge, signing or settlement failure
    #[error("Payment error: {message}")]
    Payment {
        message: String,
        #[source]
        source: Option<Box<BlockrunError>>,
    },

    /// Server answered with a status outside {200, 402}
    #[error("BlockRun API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Entropy source failure
    #[error("Cryptographic error: {message}")]
    Crypto { message: String },

    /// Typed-data hashing or ECDSA signing failure
    #[error("Signing error: {message}")]
    Signing { message: String },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 encoding/decoding error
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Timeout error
    #[error("Request timeout")]
    Timeout,

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Unexpected error
    #[error("Unexpected error: {message}")]
    Unexpected { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for BlockrunError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl BlockrunError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a payment error
    pub fn payment(message: impl Into<String>) -> Self {
        Self::Payment {
            message: message.into(),
            source: None,
        }
    }

    /// Create a payment error wrapping the failure of an inner component
    pub fn payment_caused_by(message: impl Into<String>, source: BlockrunError) -> Self {
        let message = format!("{}: {}", message.into(), source);
        Self::Payment {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an API error carrying the raw response body
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a cryptographic error
    pub fn crypto(message: impl Into<String>) -> Self {
        Self::Crypto {
            message: message.into(),
        }
    }

    /// Create a signing error
    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the payment handshake
    pub fn is_payment(&self) -> bool {
        matches!(self, Self::Payment { .. })
    }

    /// HTTP status carried by an [`BlockrunError::Api`] error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_payment_error_keeps_source() {
        let err = BlockrunError::payment_caused_by(
            "Failed to create payment",
            BlockrunError::signing("invalid amount"),
        );
        assert!(err.is_payment());
        assert_eq!(
            err.to_string(),
            "Payment error: Failed to create payment: Signing error: invalid amount"
        );
        let source = err.source().expect("source is kept");
        assert_eq!(source.to_string(), "Signing error: invalid amount");
    }

    #[test]
    fn test_api_error_status() {
        let err = BlockrunError::api(500, "{\"error\":\"boom\"}");
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("boom"));
        assert_eq!(BlockrunError::Timeout.status(), None);
    }
}
