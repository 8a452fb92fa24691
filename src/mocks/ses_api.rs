//! Scripted [`SesApi`] for exercising command handlers.

use crate::client::SesApi;
use crate::error::SesResult;
use crate::types::{SendDataPoint, SendQuota, SendRawEmailOutput, SendRawEmailRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded call on [`MockSesApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// `send_raw_email`.
    SendRawEmail(SendRawEmailRequest),
    /// `verify_email_address` with its address.
    VerifyEmailAddress(String),
    /// `list_verified_email_addresses`.
    ListVerifiedEmailAddresses,
    /// `get_send_quota`.
    GetSendQuota,
    /// `get_send_statistics`.
    GetSendStatistics,
    /// `delete_verified_email_address` with its address.
    DeleteVerifiedEmailAddress(String),
}

/// In-memory [`SesApi`] that records every call.
///
/// Each operation answers from its own queue of scripted results. An empty
/// queue yields a successful default: a fixed message ID for sends, `()`
/// for verify and delete, and the configured list, quota and statistics.
///
/// ```
/// use postman::client::SesApi;
/// use postman::mocks::{MockCall, MockSesApi};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let api = MockSesApi::new().with_verified_addresses(["b@x.com", "a@x.com"]);
///
/// let listed = api.list_verified_email_addresses().await.unwrap();
/// assert_eq!(listed, vec!["b@x.com", "a@x.com"]);
/// assert_eq!(api.calls(), vec![MockCall::ListVerifiedEmailAddresses]);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockSesApi {
    calls: Mutex<Vec<MockCall>>,
    send_results: Mutex<VecDeque<SesResult<SendRawEmailOutput>>>,
    verify_results: Mutex<VecDeque<SesResult<()>>>,
    delete_results: Mutex<VecDeque<SesResult<()>>>,
    verified_addresses: Vec<String>,
    quota: SendQuota,
    statistics: Vec<SendDataPoint>,
}

/// Message ID returned by a send when no result was scripted.
pub const MOCK_MESSAGE_ID: &str = "mock-message-id";

/// Request ID returned by a send when no result was scripted.
pub const MOCK_REQUEST_ID: &str = "mock-request-id";

impl MockSesApi {
    /// A mock with no scripted results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next `send_raw_email`.
    pub fn with_send_result(self, result: SesResult<SendRawEmailOutput>) -> Self {
        self.send_results.lock().unwrap().push_back(result);
        self
    }

    /// Queue the result of the next `verify_email_address`.
    pub fn with_verify_result(self, result: SesResult<()>) -> Self {
        self.verify_results.lock().unwrap().push_back(result);
        self
    }

    /// Queue the result of the next `delete_verified_email_address`.
    pub fn with_delete_result(self, result: SesResult<()>) -> Self {
        self.delete_results.lock().unwrap().push_back(result);
        self
    }

    /// Addresses returned by `list_verified_email_addresses`.
    pub fn with_verified_addresses<I, S>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verified_addresses = addresses.into_iter().map(Into::into).collect();
        self
    }

    /// Quota returned by `get_send_quota`.
    pub fn with_quota(mut self, quota: SendQuota) -> Self {
        self.quota = quota;
        self
    }

    /// Points returned by `get_send_statistics`.
    pub fn with_statistics(mut self, points: Vec<SendDataPoint>) -> Self {
        self.statistics = points;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SesApi for MockSesApi {
    async fn send_raw_email(&self, request: SendRawEmailRequest) -> SesResult<SendRawEmailOutput> {
        self.record(MockCall::SendRawEmail(request));
        self.send_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(SendRawEmailOutput {
                    message_id: Some(MOCK_MESSAGE_ID.to_string()),
                    request_id: Some(MOCK_REQUEST_ID.to_string()),
                })
            })
    }

    async fn verify_email_address(&self, email: &str) -> SesResult<()> {
        self.record(MockCall::VerifyEmailAddress(email.to_string()));
        self.verify_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }

    async fn list_verified_email_addresses(&self) -> SesResult<Vec<String>> {
        self.record(MockCall::ListVerifiedEmailAddresses);
        Ok(self.verified_addresses.clone())
    }

    async fn get_send_quota(&self) -> SesResult<SendQuota> {
        self.record(MockCall::GetSendQuota);
        Ok(self.quota)
    }

    async fn get_send_statistics(&self) -> SesResult<Vec<SendDataPoint>> {
        self.record(MockCall::GetSendStatistics);
        Ok(self.statistics.clone())
    }

    async fn delete_verified_email_address(&self, email: &str) -> SesResult<()> {
        self.record(MockCall::DeleteVerifiedEmailAddress(email.to_string()));
        self.delete_results.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
