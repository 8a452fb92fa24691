//! Mapping of SES error documents to [`SesError`].
//!
//! The SES Query API reports failures as XML:
//!
//! ```xml
//! <ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
//!   <Error>
//!     <Type>Sender</Type>
//!     <Code>Throttling</Code>
//!     <Message>Maximum sending rate exceeded.</Message>
//!   </Error>
//!   <RequestId>abc-123</RequestId>
//! </ErrorResponse>
//! ```
//!
//! Decoding the document is done by [`crate::xml::parse_error_response`];
//! this module turns the decoded fields plus the HTTP status into an error.

use super::SesError;

/// Decoded SES error document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsErrorResponse {
    /// Fault side reported by SES, `Sender` or `Receiver`.
    pub error_type: Option<String>,
    /// The AWS error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// AWS request ID.
    pub request_id: Option<String>,
}

impl AwsErrorResponse {
    /// Build a placeholder for replies whose body carried no error document.
    pub fn from_status(status: u16, request_id: Option<String>) -> Self {
        let reason = http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown status");

        Self {
            error_type: None,
            code: if status >= 500 {
                "ServiceUnavailable".to_string()
            } else {
                "UnknownError".to_string()
            },
            message: reason.to_string(),
            request_id,
        }
    }
}

/// Map a decoded error document to [`SesError::AwsApi`].
///
/// # Examples
///
/// ```rust
/// use postman::error::{map_aws_error, AwsErrorResponse};
///
/// let error = AwsErrorResponse {
///     error_type: Some("Sender".to_string()),
///     code: "MessageRejected".to_string(),
///     message: "Email address is not verified.".to_string(),
///     request_id: Some("abc-123".to_string()),
/// };
///
/// let ses_error = map_aws_error(&error, 400);
/// assert_eq!(ses_error.error_code(), Some("MessageRejected"));
/// assert_eq!(ses_error.status(), Some(400));
/// ```
pub fn map_aws_error(error: &AwsErrorResponse, status_code: u16) -> SesError {
    SesError::AwsApi {
        status: status_code,
        code: error.code.clone(),
        message: error.message.clone(),
        request_id: error.request_id.clone(),
    }
}
