//! AWS shared profile file credentials provider.

use super::{AwsCredentials, CredentialProvider};
use crate::credentials::error::CredentialError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::{env, fs};

/// Default profile name.
pub const DEFAULT_PROFILE: &str = "default";

/// AWS profile name environment variable.
pub const AWS_PROFILE: &str = "AWS_PROFILE";

/// AWS credentials file environment variable.
pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";

/// AWS config file environment variable.
pub const AWS_CONFIG_FILE: &str = "AWS_CONFIG_FILE";

const MAX_SOURCE_PROFILE_DEPTH: usize = 4;

type Profiles = HashMap<String, HashMap<String, String>>;

/// Credentials provider that reads from the shared AWS profile files.
///
/// Reads `~/.aws/credentials` (or `AWS_SHARED_CREDENTIALS_FILE`) and
/// `~/.aws/config` (or `AWS_CONFIG_FILE`). Keys found in the config file
/// override those in the credentials file. The profile is the constructor
/// argument, else `AWS_PROFILE`, else `default`.
///
/// Supported keys: `aws_access_key_id`, `aws_secret_access_key`,
/// `aws_session_token`, `source_profile`, and `region` (read through
/// [`ProfileCredentialProvider::region`]).
///
/// # Example
///
/// ```no_run
/// use postman::credentials::{CredentialProvider, ProfileCredentialProvider};
///
/// # async {
/// let provider = ProfileCredentialProvider::with_profile("production");
/// let credentials = provider.credentials().await?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// # };
/// ```
#[derive(Debug, Clone)]
pub struct ProfileCredentialProvider {
    profile_name: String,
    credentials_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl ProfileCredentialProvider {
    /// Create a new provider using `AWS_PROFILE` or the default profile.
    pub fn new() -> Self {
        let profile = env::var(AWS_PROFILE)
            .ok()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());
        Self::with_profile(profile)
    }

    /// Create a provider for a specific profile.
    pub fn with_profile(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            credentials_path: None,
            config_path: None,
        }
    }

    /// Set a custom credentials file path.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Set a custom config file path.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Name of the selected profile.
    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    /// The `region` key of the selected profile, if any.
    pub fn region(&self) -> Option<String> {
        self.load_profiles()
            .get(&self.profile_name)
            .and_then(|profile| profile.get("region"))
            .filter(|region| !region.is_empty())
            .cloned()
    }

    fn credentials_file_path(&self) -> PathBuf {
        resolve_path(&self.credentials_path, AWS_SHARED_CREDENTIALS_FILE, "credentials")
    }

    fn config_file_path(&self) -> PathBuf {
        resolve_path(&self.config_path, AWS_CONFIG_FILE, "config")
    }

    pub(crate) fn parse_profile_file(content: &str) -> Profiles {
        let mut profiles: Profiles = HashMap::new();
        let mut current_profile: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let profile_name = line[1..line.len() - 1].trim();
                // config file sections are written `[profile name]`
                let profile_name = profile_name
                    .strip_prefix("profile ")
                    .map(str::trim)
                    .unwrap_or(profile_name);
                current_profile = Some(profile_name.to_string());
                profiles.entry(profile_name.to_string()).or_default();
                continue;
            }

            if let Some(profile) = &current_profile {
                if let Some((key, value)) = line.split_once('=') {
                    profiles
                        .entry(profile.clone())
                        .or_default()
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }

        profiles
    }

    fn load_profiles(&self) -> Profiles {
        let mut merged: Profiles = HashMap::new();

        for path in [self.credentials_file_path(), self.config_file_path()] {
            if let Ok(content) = fs::read_to_string(&path) {
                for (name, values) in Self::parse_profile_file(&content) {
                    merged.entry(name).or_default().extend(values);
                }
            }
        }

        merged
    }

    fn resolve(
        &self,
        profiles: &Profiles,
        name: &str,
        depth: usize,
    ) -> Result<AwsCredentials, CredentialError> {
        if depth > MAX_SOURCE_PROFILE_DEPTH {
            return Err(CredentialError::ProfileError {
                message: format!("source_profile chain starting at '{}' is too deep", self.profile_name),
            });
        }

        let profile = profiles
            .get(name)
            .filter(|values| !values.is_empty())
            .ok_or_else(|| CredentialError::ProfileError {
                message: format!(
                    "Profile '{}' not found in {} or {}",
                    name,
                    self.credentials_file_path().display(),
                    self.config_file_path().display()
                ),
            })?;

        if let Some(source_profile) = profile.get("source_profile") {
            tracing::debug!(profile = name, source_profile = %source_profile, "following source_profile");
            return self.resolve(profiles, source_profile, depth + 1);
        }

        let field = |key: &str| {
            profile.get(key).ok_or_else(|| CredentialError::ProfileError {
                message: format!("{} not found in profile '{}'", key, name),
            })
        };

        let credentials = AwsCredentials::new(
            field("aws_access_key_id")?.as_str(),
            field("aws_secret_access_key")?.as_str(),
        );

        Ok(match profile.get("aws_session_token") {
            Some(token) => credentials.with_session_token(token.as_str()),
            None => credentials,
        })
    }
}

fn resolve_path(explicit: &Option<PathBuf>, env_var: &str, file_name: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.clone();
    }

    if let Ok(path) = env::var(env_var) {
        return PathBuf::from(path);
    }

    dirs::home_dir()
        .map(|home| home.join(".aws").join(file_name))
        .unwrap_or_else(|| PathBuf::from("~/.aws").join(file_name))
}

impl Default for ProfileCredentialProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialProvider for ProfileCredentialProvider {
    async fn credentials(&self) -> Result<AwsCredentials, CredentialError> {
        let profiles = self.load_profiles();
        self.resolve(&profiles, &self.profile_name, 0)
    }

    fn name(&self) -> &'static str {
        "profile"
    }
}
