//! Errors raised while assembling a [`SesConfig`](super::SesConfig).

use thiserror::Error;

/// A configuration could not be built.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The builder was not given a required value.
    #[error("{field} is required")]
    MissingField {
        /// Builder field name.
        field: String,
    },

    /// A value was given but cannot be used.
    #[error("invalid configuration: {message}")]
    Invalid {
        /// What is wrong with it.
        message: String,
    },

    /// An environment variable could not be read.
    #[error("cannot read environment: {message}")]
    Environment {
        /// Variable name and reason.
        message: String,
    },
}
