//! SES client: the six Query API operations the CLI needs.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::config::SesConfig;
use crate::error::SesResult;
use crate::http::{SesHttpClient, SesRequest, SesResponse, Transport};
use crate::types::{SendDataPoint, SendQuota, SendRawEmailOutput, SendRawEmailRequest};
use crate::xml;

/// The SES operations used by the command handlers.
///
/// Handlers take `&dyn SesApi` (or a generic bound) so tests can drive them
/// with [`MockSesApi`](crate::mocks::MockSesApi).
#[async_trait]
pub trait SesApi: Send + Sync {
    /// Send a complete MIME message to the given recipients.
    async fn send_raw_email(&self, request: SendRawEmailRequest) -> SesResult<SendRawEmailOutput>;

    /// Ask SES to send a verification mail to `email`.
    async fn verify_email_address(&self, email: &str) -> SesResult<()>;

    /// Addresses verified on the account, in the order SES returns them.
    async fn list_verified_email_addresses(&self) -> SesResult<Vec<String>>;

    /// Current sending limits.
    async fn get_send_quota(&self) -> SesResult<SendQuota>;

    /// Sending activity for the last two weeks, unordered.
    async fn get_send_statistics(&self) -> SesResult<Vec<SendDataPoint>>;

    /// Remove `email` from the verified list.
    async fn delete_verified_email_address(&self, email: &str) -> SesResult<()>;
}

/// [`SesApi`] over the Query API.
///
/// ```rust,no_run
/// use postman::client::{SesApi, SesClient};
/// use postman::config::{ConfigOverrides, SesConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SesClient::new(SesConfig::from_env(ConfigOverrides::default())?)?;
/// let quota = client.get_send_quota().await?;
/// println!("{}", quota.max_send_rate);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SesClient {
    http: SesHttpClient,
}

impl SesClient {
    /// Create a client that talks to SES over HTTPS.
    pub fn new(config: SesConfig) -> SesResult<Self> {
        Ok(Self {
            http: SesHttpClient::new(config)?,
        })
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: SesConfig, transport: Arc<dyn Transport>) -> SesResult<Self> {
        Ok(Self {
            http: SesHttpClient::with_transport(config, transport)?,
        })
    }

    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }

    async fn call(&self, request: SesRequest) -> SesResult<(SesResponse, String)> {
        let response = self.http.send_request(request).await?;
        let body = response.body_string()?.to_string();
        Ok((response, body))
    }
}

#[async_trait]
impl SesApi for SesClient {
    #[instrument(skip(self, request), fields(source = %request.source, recipients = request.destinations.len()))]
    async fn send_raw_email(&self, request: SendRawEmailRequest) -> SesResult<SendRawEmailOutput> {
        debug!(size = request.raw_message.len(), "encoding raw message");

        let ses_request = SesRequest::action("SendRawEmail")
            .param("Source", request.source.as_str())
            .member_list("Destinations", request.destinations.as_slice())
            .param("RawMessage.Data", STANDARD.encode(&request.raw_message));

        let (response, body) = self.call(ses_request).await?;
        let mut output = xml::parse_send_raw_email(&body)?;

        if output.request_id.is_none() {
            output.request_id = response.request_id().map(str::to_string);
        }

        info!(
            message_id = output.message_id.as_deref().unwrap_or("-"),
            request_id = output.request_id.as_deref().unwrap_or("-"),
            "raw email accepted"
        );
        Ok(output)
    }

    #[instrument(skip(self))]
    async fn verify_email_address(&self, email: &str) -> SesResult<()> {
        self.call(SesRequest::action("VerifyEmailAddress").param("EmailAddress", email))
            .await?;
        info!("verification requested");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_verified_email_addresses(&self) -> SesResult<Vec<String>> {
        let (_, body) = self.call(SesRequest::action("ListVerifiedEmailAddresses")).await?;
        let addresses = xml::parse_list_verified_email_addresses(&body)?;
        debug!(count = addresses.len(), "listed verified addresses");
        Ok(addresses)
    }

    #[instrument(skip(self))]
    async fn get_send_quota(&self) -> SesResult<SendQuota> {
        let (_, body) = self.call(SesRequest::action("GetSendQuota")).await?;
        xml::parse_send_quota(&body)
    }

    #[instrument(skip(self))]
    async fn get_send_statistics(&self) -> SesResult<Vec<SendDataPoint>> {
        let (_, body) = self.call(SesRequest::action("GetSendStatistics")).await?;
        let points = xml::parse_send_statistics(&body)?;
        debug!(count = points.len(), "fetched send statistics");
        Ok(points)
    }

    #[instrument(skip(self))]
    async fn delete_verified_email_address(&self, email: &str) -> SesResult<()> {
        self.call(SesRequest::action("DeleteVerifiedEmailAddress").param("EmailAddress", email))
            .await?;
        info!("verified address deleted");
        Ok(())
    }
}
