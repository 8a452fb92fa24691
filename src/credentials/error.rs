//! Credential lookup failures.

use thiserror::Error;

/// Why no usable credentials were found.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The source had nothing to offer, e.g. an unset variable.
    #[error("credentials not available: {message}")]
    Missing {
        /// Which value was absent.
        message: String,
    },

    /// A value was present but unusable.
    #[error("credentials rejected: {message}")]
    Invalid {
        /// Which value and why.
        message: String,
    },

    /// The credentials carry an expiry in the past.
    #[error("credentials have expired")]
    Expired,

    /// The shared profile files could not supply the selected profile.
    #[error("profile lookup failed: {message}")]
    ProfileError {
        /// Profile name and the missing key or file.
        message: String,
    },

    /// Every provider in a chain failed.
    #[error("no credentials found ({})", .attempts.join("; "))]
    ChainExhausted {
        /// `provider: reason`, in lookup order.
        attempts: Vec<String>,
    },
}
