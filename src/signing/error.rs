//! Failures while computing a request signature.

use thiserror::Error;

/// Why a request could not be signed.
#[derive(Debug, Error)]
pub enum SigningError {
    /// A header the signature covers is absent from the request.
    #[error("header '{header}' must be set before signing")]
    MissingHeader {
        /// Lowercase header name.
        header: String,
    },

    /// Keys were empty or a computed header value was not valid.
    ///
    /// ```
    /// use postman::signing::SigningError;
    ///
    /// let error = SigningError::SigningFailed {
    ///     message: "empty access key".to_string(),
    /// };
    /// assert_eq!(error.to_string(), "cannot sign request: empty access key");
    /// ```
    #[error("cannot sign request: {message}")]
    SigningFailed {
        /// What went wrong.
        message: String,
    },
}
