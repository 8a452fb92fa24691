//! Request and response types for the SES operations the CLI uses.

use chrono::{DateTime, Utc};

/// Input to `SendRawEmail`.
///
/// ```
/// use postman::types::SendRawEmailRequest;
///
/// let request = SendRawEmailRequest::new(
///     "sender@example.com",
///     vec!["rcpt@example.com".to_string()],
///     b"Subject: hi\r\n\r\nbody".to_vec(),
/// );
/// assert_eq!(request.destinations.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRawEmailRequest {
    /// Envelope sender.
    pub source: String,
    /// Envelope recipients, in order.
    pub destinations: Vec<String>,
    /// The full RFC 5322 message, headers included.
    pub raw_message: Vec<u8>,
}

impl SendRawEmailRequest {
    /// Create a new raw email request.
    pub fn new(source: impl Into<String>, destinations: Vec<String>, raw_message: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            destinations,
            raw_message,
        }
    }
}

/// Result of `SendRawEmail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendRawEmailOutput {
    /// Message ID assigned by SES. Absent means the message was not queued.
    pub message_id: Option<String>,
    /// Request ID of the call.
    pub request_id: Option<String>,
}

/// Sending limits of the account, from `GetSendQuota`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SendQuota {
    /// Messages sent during the previous 24 hours.
    pub sent_last_24_hours: f64,
    /// Maximum messages allowed per 24 hours.
    pub max_24_hour_send: f64,
    /// Maximum messages per second.
    pub max_send_rate: f64,
}

/// One 15-minute bucket of sending activity, from `GetSendStatistics`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendDataPoint {
    /// Start of the bucket.
    pub timestamp: DateTime<Utc>,
    /// Messages SES attempted to deliver.
    pub delivery_attempts: i64,
    /// Messages SES refused to send.
    pub rejects: i64,
    /// Hard bounces.
    pub bounces: i64,
    /// Recipient complaints.
    pub complaints: i64,
}
