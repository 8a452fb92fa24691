//! Text rendering of command results.
//!
//! Absent identifiers render as `None`.

use crate::types::{SendDataPoint, SendQuota};

/// Placeholder for an identifier SES did not return.
pub const MISSING: &str = "None";

/// Informational line printed by `list_verified` when nothing is verified.
pub const NO_VERIFIED_ADDRESSES: &str = "No addresses are verified on this account.";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

/// `post_to=` tokens: every recipient when verbose, otherwise the first.
pub fn recipients(destinations: &[String], verbose: bool) -> String {
    let shown = if verbose {
        destinations
    } else {
        &destinations[..destinations.len().min(1)]
    };

    shown
        .iter()
        .map(|d| format!("post_to={}", d))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `post_from=.. post_to=..` tail shared by every send status line.
pub fn send_details(from: &str, destinations: &[String], verbose: bool) -> String {
    let to = recipients(destinations, verbose);
    if to.is_empty() {
        format!("post_from={}", from)
    } else {
        format!("post_from={} {}", from, to)
    }
}

/// Status line for an accepted message.
pub fn send_ok(message_id: Option<&str>, request_id: Option<&str>, details: &str) -> String {
    format!(
        "post_status=OK msgid={} reqid={} {}",
        or_missing(message_id),
        or_missing(request_id),
        details
    )
}

/// Status line for a message SES acknowledged without a message ID.
pub fn send_not_sent(request_id: Option<&str>, details: &str) -> String {
    format!("post_status=NOTSENT reqid={} {}", or_missing(request_id), details)
}

/// Status line for a service-side rejection.
pub fn send_error(
    status: u16,
    message: &str,
    code: &str,
    request_id: Option<&str>,
    details: &str,
) -> String {
    format!(
        "post_status=ERROR http_status={} errmsg=\"{}\" errcode={} reqid={} {}",
        status,
        message,
        code,
        or_missing(request_id),
        details
    )
}

/// Status line for a message that was deliberately not sent.
pub fn send_ignored(details: &str) -> String {
    format!("post_status=IGNORE {}", details)
}

/// Confirmation printed per address by `verify`.
pub fn verification_sent(email: &str) -> String {
    format!("Verification for {} sent.", email)
}

/// Confirmation printed per address by `delete_verified`.
pub fn deleted(email: &str) -> String {
    format!("Deleted {}", email)
}

/// Header and data row of the quota table.
pub fn quota_table(quota: &SendQuota) -> [String; 2] {
    [
        format!(
            "{:<15} {:<15} {:<14}",
            "SentLast24Hours", "Max24HourSend", "MaxSendRate"
        ),
        format!(
            "{:<15.0} {:<15.0} {:<14.0}",
            quota.sent_last_24_hours, quota.max_24_hour_send, quota.max_send_rate
        ),
    ]
}

/// Header of the statistics table.
pub fn stats_header() -> String {
    format!(
        "{:<20} {:>10} {:>8} {:>7} {:>7}",
        "Timestamp", "DeliveryAttempts", "Rejects", "Bounces", "Complaints"
    )
}

/// One statistics row.
pub fn stats_row(point: &SendDataPoint) -> String {
    format!(
        "{:<20} {:>10} {:>8} {:>7} {:>7}",
        point.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        point.delivery_attempts,
        point.rejects,
        point.bounces,
        point.complaints
    )
}
