//! Configuration for the SES client.
//!
//! Covers region and endpoint selection, the credential provider, and HTTP
//! timeouts. [`SesConfig::from_env`] implements the lookup order the CLI
//! uses: explicit overrides first, then the standard AWS environment
//! variables, then the shared profile files, then built-in defaults.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

pub mod error;

pub use error::ConfigError;

use crate::credentials::{
    CredentialProvider, DefaultCredentialProvider, ProfileCredentialProvider,
    StaticCredentialProvider,
};

/// Region used when nothing else names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Environment variables consulted for the region, in order.
pub const REGION_ENV_VARS: [&str; 2] = ["AWS_REGION", "AWS_DEFAULT_REGION"];

/// Environment variables consulted for an endpoint override, in order.
pub const ENDPOINT_ENV_VARS: [&str; 2] = ["AWS_ENDPOINT_URL_SES", "AWS_ENDPOINT_URL"];

/// Values supplied on the command line that take precedence over the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Region to use.
    pub region: Option<String>,
    /// Named profile for credentials and region.
    pub profile: Option<String>,
    /// Endpoint URL replacing the regional SES endpoint.
    pub endpoint: Option<String>,
}

/// Configuration for the SES client.
#[derive(Clone)]
pub struct SesConfig {
    /// AWS region (e.g., "us-east-1").
    pub region: String,

    /// Custom endpoint URL (for LocalStack or test servers).
    pub endpoint: Option<String>,

    /// Credential provider for AWS authentication.
    pub credentials_provider: Arc<dyn CredentialProvider>,

    /// Timeout for the entire request.
    pub timeout: Duration,

    /// Timeout for establishing connections.
    pub connect_timeout: Duration,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl SesConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use postman::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-east-1")
    ///     .credentials("access_key", "secret_key")
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.region, "us-east-1");
    /// ```
    pub fn builder() -> SesConfigBuilder {
        SesConfigBuilder::default()
    }

    /// Resolve a configuration from overrides, environment and profile files.
    ///
    /// Region: override, `AWS_REGION`, `AWS_DEFAULT_REGION`, the profile's
    /// `region` key, then [`DEFAULT_REGION`]. Endpoint: override,
    /// `AWS_ENDPOINT_URL_SES`, `AWS_ENDPOINT_URL`. Credentials come from the
    /// default chain bound to the selected profile.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let profile = match overrides.profile {
            Some(name) => ProfileCredentialProvider::with_profile(name),
            None => ProfileCredentialProvider::new(),
        };

        let region = match overrides.region {
            Some(region) => region,
            None => first_env(&REGION_ENV_VARS)?
                .or_else(|| profile.region())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        };

        let endpoint = match overrides.endpoint {
            Some(endpoint) => Some(endpoint),
            None => first_env(&ENDPOINT_ENV_VARS)?,
        };

        let mut builder = Self::builder()
            .region(region)
            .credentials_provider(DefaultCredentialProvider::with_profile_provider(profile));

        if let Some(endpoint) = endpoint {
            builder = builder.endpoint(endpoint);
        }

        builder.build()
    }

    /// Get the SES endpoint URL for this configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use postman::config::SesConfig;
    ///
    /// let config = SesConfig::builder()
    ///     .region("us-west-2")
    ///     .credentials("access_key", "secret_key")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(config.ses_endpoint(), "https://email.us-west-2.amazonaws.com");
    /// ```
    pub fn ses_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("https://email.{}.amazonaws.com", self.region))
    }
}

impl fmt::Debug for SesConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SesConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

fn first_env(names: &[&str]) -> Result<Option<String>, ConfigError> {
    for name in names {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => return Ok(Some(value)),
            Ok(_) | Err(env::VarError::NotPresent) => {}
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::Environment {
                    message: format!("{} is not valid unicode", name),
                })
            }
        }
    }
    Ok(None)
}

/// Builder for creating SES client configurations.
#[derive(Default)]
pub struct SesConfigBuilder {
    region: Option<String>,
    endpoint: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialProvider>>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SesConfigBuilder {
    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set a custom endpoint URL.
    ///
    /// Useful for testing against LocalStack or a mock server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a custom credential provider.
    pub fn credentials_provider(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials_provider = Some(Arc::new(provider));
        self
    }

    /// Set static credentials (convenience method).
    pub fn credentials(self, access_key: &str, secret_key: &str) -> Self {
        self.credentials_provider(StaticCredentialProvider::from_keys(access_key, secret_key))
    }

    /// Set the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set a custom user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the region or credentials
    /// provider is not set, and `ConfigError::Invalid` if the region is blank
    /// or the endpoint is not an absolute URL with a host.
    pub fn build(self) -> Result<SesConfig, ConfigError> {
        let region = self.region.ok_or_else(|| ConfigError::MissingField {
            field: "region".to_string(),
        })?;

        if region.trim().is_empty() {
            return Err(ConfigError::Invalid {
                message: "region must not be empty".to_string(),
            });
        }

        let credentials_provider =
            self.credentials_provider
                .ok_or_else(|| ConfigError::MissingField {
                    field: "credentials_provider".to_string(),
                })?;

        if let Some(endpoint) = &self.endpoint {
            let url = Url::parse(endpoint).map_err(|e| ConfigError::Invalid {
                message: format!("endpoint '{}' is not a valid URL: {}", endpoint, e),
            })?;
            if url.host_str().is_none() {
                return Err(ConfigError::Invalid {
                    message: format!("endpoint '{}' has no host", endpoint),
                });
            }
        }

        Ok(SesConfig {
            region,
            endpoint: self.endpoint,
            credentials_provider,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            connect_timeout: self.connect_timeout.unwrap_or(Duration::from_secs(10)),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| concat!("postman/", env!("CARGO_PKG_VERSION")).to_string()),
        })
    }
}
