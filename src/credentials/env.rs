//! Environment variable credentials provider.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::env;

/// Access key ID variable.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret access key variable.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Session token variable.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// `AWS_ACCESS_KEY_ID` and `AWS_SECRET_ACCESS_KEY` are required,
/// `AWS_SESSION_TOKEN` is optional.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCredentialProvider;

impl EnvironmentCredentialProvider {
    /// Create a new environment credentials provider.
    pub fn new() -> Self {
        Self
    }
}

fn required(name: &str) -> Result<String, CredentialError> {
    let value = env::var(name).map_err(|_| CredentialError::Missing {
        message: format!("{} environment variable not set", name),
    })?;

    if value.is_empty() {
        return Err(CredentialError::Invalid {
            message: format!("{} is empty", name),
        });
    }

    Ok(value)
}

#[async_trait]
impl CredentialProvider for EnvironmentCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        let access_key_id = required(AWS_ACCESS_KEY_ID)?;
        let secret_access_key = required(AWS_SECRET_ACCESS_KEY)?;

        let credentials = AwsCredentials::new(access_key_id, secret_access_key);

        Ok(match env::var(AWS_SESSION_TOKEN).ok().filter(|s| !s.is_empty()) {
            Some(token) => credentials.with_session_token(token),
            None => credentials,
        })
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}
