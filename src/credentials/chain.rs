//! Chain credential provider for trying multiple sources in order.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A credential provider that tries each configured provider in order.
///
/// # Example
///
/// ```no_run
/// use postman::credentials::{
///     ChainCredentialProvider, CredentialProvider, EnvironmentCredentialProvider,
///     ProfileCredentialProvider,
/// };
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ChainCredentialProvider::new()
///     .with_provider(EnvironmentCredentialProvider::new())
///     .with_provider(ProfileCredentialProvider::new());
///
/// let credentials = provider.credentials().await?;
/// # Ok(())
/// # }
/// ```
///
/// The first provider that returns credentials wins and later providers are
/// not called. If every provider fails, the result is
/// [`CredentialError::ChainExhausted`] listing each provider's failure.
#[derive(Clone)]
pub struct ChainCredentialProvider {
    providers: Vec<Arc<dyn CredentialProvider>>,
}

impl ChainCredentialProvider {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a provider to the end of the chain.
    pub fn with_provider<P>(mut self, provider: P) -> Self
    where
        P: CredentialProvider + 'static,
    {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Add a shared provider to the end of the chain.
    pub fn with_arc_provider(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Names of the configured providers, in lookup order.
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

impl Default for ChainCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for ChainCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            match provider.credentials().await {
                Ok(credentials) => {
                    tracing::debug!(provider = provider.name(), "resolved AWS credentials");
                    return Ok(credentials);
                }
                Err(err) => {
                    tracing::debug!(provider = provider.name(), error = %err, "credential provider failed");
                    attempts.push(format!("{}: {}", provider.name(), err));
                }
            }
        }

        Err(CredentialError::ChainExhausted { attempts })
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

impl fmt::Debug for ChainCredentialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainCredentialProvider")
            .field("providers", &self.provider_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProvider {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl CredentialProvider for FailingProvider {
        async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CredentialError::Missing {
                message: "nothing here".to_string(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_success() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ChainCredentialProvider::new()
            .with_provider(FailingProvider {
                calls: calls.clone(),
            })
            .with_provider(StaticCredentialProvider::from_keys("AKID1", "SECRET1"))
            .with_provider(StaticCredentialProvider::from_keys("AKID2", "SECRET2"));

        let creds = provider.credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKID1");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_chain_exhausted_lists_every_attempt() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = ChainCredentialProvider::new()
            .with_provider(FailingProvider {
                calls: calls.clone(),
            })
            .with_provider(FailingProvider {
                calls: calls.clone(),
            });

        match provider.credentials().await {
            Err(CredentialError::ChainExhausted { attempts }) => {
                assert_eq!(attempts.len(), 2);
                assert!(attempts[0].starts_with("failing: "));
            }
            other => panic!("Expected ChainExhausted, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_chain_fails() {
        let provider = ChainCredentialProvider::new();
        assert!(provider.provider_names().is_empty());
        assert!(matches!(
            provider.credentials().await,
            Err(CredentialError::ChainExhausted { .. })
        ));
    }
}
