//! Error types for the SES client.
//!
//! Errors are split by where they originate so the CLI can tell the one
//! category it reports in a structured way (a service-level rejection from
//! SES) apart from everything else (configuration, credentials, signing,
//! network, malformed responses), which is left to propagate.
//!
//! # Examples
//!
//! ```rust
//! use postman::error::SesError;
//!
//! let error = SesError::AwsApi {
//!     status: 400,
//!     code: "Throttling".to_string(),
//!     message: "Rate exceeded".to_string(),
//!     request_id: Some("abc-123".to_string()),
//! };
//!
//! assert!(error.is_service_error());
//! assert_eq!(error.error_code(), Some("Throttling"));
//! assert_eq!(error.request_id(), Some("abc-123"));
//! ```

mod mapping;

pub use mapping::{map_aws_error, AwsErrorResponse};

use thiserror::Error;

use crate::config::ConfigError;
use crate::credentials::CredentialError;
use crate::signing::SigningError;

/// Result alias used throughout the crate.
pub type SesResult<T> = std::result::Result<T, SesError>;

/// Top-level error type for SES operations.
#[derive(Debug, Error)]
pub enum SesError {
    /// The client is misconfigured.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// AWS credentials could not be resolved.
    #[error("Credential error: {message}")]
    Credential {
        /// Description of the credential error.
        message: String,
    },

    /// Request signing failed.
    #[error("Signing error: {message}")]
    Signing {
        /// Description of the signing error.
        message: String,
    },

    /// Network or HTTP-level failure before a response was received.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport error.
        message: String,
        /// Optional underlying error source.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request timed out.
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// A response body could not be decoded.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the decoding failure.
        message: String,
    },

    /// SES answered with an error document.
    ///
    /// This is the only variant the `send` command catches and reports on
    /// its status line.
    #[error("AWS API error: {code} - {message} (HTTP {status})")]
    AwsApi {
        /// HTTP status code of the response.
        status: u16,
        /// AWS error code (e.g. "MessageRejected").
        code: String,
        /// Human-readable error message.
        message: String,
        /// AWS request ID for debugging.
        request_id: Option<String>,
    },
}

impl SesError {
    /// Returns true if SES itself rejected the request.
    pub fn is_service_error(&self) -> bool {
        matches!(self, SesError::AwsApi { .. })
    }

    /// Returns the AWS error code if available.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            SesError::AwsApi { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Returns the AWS request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SesError::AwsApi { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }

    /// Returns the HTTP status of a service error.
    pub fn status(&self) -> Option<u16> {
        match self {
            SesError::AwsApi { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ConfigError> for SesError {
    fn from(err: ConfigError) -> Self {
        SesError::Configuration {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<CredentialError> for SesError {
    fn from(err: CredentialError) -> Self {
        SesError::Credential {
            message: err.to_string(),
        }
    }
}

impl From<SigningError> for SesError {
    fn from(err: SigningError) -> Self {
        SesError::Signing {
            message: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for SesError {
    fn from(err: quick_xml::Error) -> Self {
        SesError::Serialization {
            message: format!("Malformed XML response: {}", err),
        }
    }
}

impl From<reqwest::Error> for SesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SesError::Timeout {
                message: err.to_string(),
            }
        } else {
            SesError::Transport {
                message: err.to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}
