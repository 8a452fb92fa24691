//! Signing HTTP client for the SES Query API.

use chrono::Utc;
use http::header::{HeaderValue, CONTENT_TYPE, HOST};
use std::sync::Arc;
use url::Url;

use crate::config::SesConfig;
use crate::credentials::AwsCredentials;
use crate::error::{SesError, SesResult};
use crate::signing::{sign_request, SigningParams, SES_SERVICE};

use super::request::{SesRequest, FORM_CONTENT_TYPE};
use super::response::SesResponse;
use super::transport::{HttpRequest, ReqwestTransport, Transport};

/// Sends signed Query API requests to one SES endpoint.
///
/// ```rust,no_run
/// use postman::config::SesConfig;
/// use postman::http::{SesHttpClient, SesRequest};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SesConfig::builder()
///     .region("us-east-1")
///     .credentials("access_key", "secret_key")
///     .build()?;
///
/// let client = SesHttpClient::new(config)?;
/// let response = client.send_request(SesRequest::action("GetSendQuota")).await?;
/// # Ok(())
/// # }
/// ```
pub struct SesHttpClient {
    config: Arc<SesConfig>,
    transport: Arc<dyn Transport>,
    endpoint: Url,
    host: String,
}

impl SesHttpClient {
    /// Create a client using the reqwest transport.
    pub fn new(config: SesConfig) -> SesResult<Self> {
        let transport =
            ReqwestTransport::new(config.timeout, config.connect_timeout, &config.user_agent)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: SesConfig, transport: Arc<dyn Transport>) -> SesResult<Self> {
        let raw = config.ses_endpoint();
        let endpoint = Url::parse(&raw).map_err(|e| SesError::Configuration {
            message: format!("Invalid endpoint URL '{}': {}", raw, e),
            source: Some(Box::new(e)),
        })?;

        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(SesError::Configuration {
                    message: format!("Endpoint URL '{}' has no host", raw),
                    source: None,
                })
            }
        };

        Ok(Self {
            config: Arc::new(config),
            transport,
            endpoint,
            host,
        })
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// The signing region.
    pub fn region(&self) -> &str {
        &self.config.region
    }

    async fn build_request(&self, ses_request: &SesRequest) -> SesResult<HttpRequest> {
        let credentials = self.config.credentials_provider.credentials().await?;

        let mut request = HttpRequest::new("POST", self.endpoint.as_str())
            .with_body(ses_request.form_body().into_bytes());

        request.headers.insert(
            HOST,
            HeaderValue::from_str(&self.host).map_err(|e| SesError::Configuration {
                message: format!("Invalid host header '{}': {}", self.host, e),
                source: None,
            })?,
        );
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        sign_request(
            &request.method,
            self.endpoint.path(),
            &[],
            &mut request.headers,
            Some(request.body.as_slice()),
            &self.signing_params(&credentials),
            &Utc::now(),
        )?;

        Ok(request)
    }

    fn signing_params(&self, credentials: &AwsCredentials) -> SigningParams {
        let params = SigningParams::new(&self.config.region, SES_SERVICE)
            .with_access_key(credentials.access_key_id())
            .with_secret_key(credentials.secret_access_key());

        match credentials.session_token() {
            Some(token) => params.with_session_token(token),
            None => params,
        }
    }

    /// Sign and send a request.
    ///
    /// # Errors
    ///
    /// Credential, signing and transport failures map to their [`SesError`]
    /// variants. A non-2xx reply becomes [`SesError::AwsApi`].
    pub async fn send_request(&self, ses_request: SesRequest) -> SesResult<SesResponse> {
        let request = self.build_request(&ses_request).await?;

        tracing::debug!(
            action = ses_request.action_name(),
            endpoint = %self.endpoint,
            "sending SES request"
        );

        let response = SesResponse::from_http(self.transport.send(request).await?)?;

        tracing::debug!(
            action = ses_request.action_name(),
            status = response.status().as_u16(),
            request_id = response.request_id().unwrap_or("-"),
            "received SES response"
        );

        if response.is_success() {
            Ok(response)
        } else {
            let error = response.into_error();
            tracing::info!(action = ses_request.action_name(), error = %error, "SES request failed");
            Err(error)
        }
    }
}

impl std::fmt::Debug for SesHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SesHttpClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("region", &self.config.region)
            .finish_non_exhaustive()
    }
}
