//! XML decoding of SES Query API responses.
//!
//! Every successful reply has the shape
//! `<{Action}Response><{Action}Result>..</{Action}Result><ResponseMetadata><RequestId>..`,
//! failures are `<ErrorResponse><Error><Code>..`. The parsers below walk the
//! event stream keeping the element path and pick values by path suffix, so
//! they tolerate unknown elements and ordering changes.

use crate::error::{AwsErrorResponse, SesError, SesResult};
use crate::types::{SendDataPoint, SendQuota, SendRawEmailOutput};
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::str::FromStr;

enum Node<'a> {
    Open(&'a [String]),
    Text(&'a [String], String),
}

fn walk<F>(xml: &str, mut visit: F) -> SesResult<()>
where
    F: FnMut(Node<'_>) -> SesResult<()>,
{
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                visit(Node::Open(&path))?;
            }
            Ok(Event::Empty(e)) => {
                path.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                visit(Node::Open(&path))?;
                path.pop();
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape()?.into_owned();
                visit(Node::Text(&path, text))?;
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(())
}

fn ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a == b)
}

fn parse_number<T: FromStr>(field: &str, text: &str) -> SesResult<T> {
    text.trim().parse().map_err(|_| SesError::Serialization {
        message: format!("{} is not a number: '{}'", field, text),
    })
}

fn parse_timestamp(text: &str) -> SesResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SesError::Serialization {
            message: format!("invalid Timestamp '{}': {}", text, e),
        })
}

/// Extract `ResponseMetadata/RequestId`.
pub fn parse_request_id(xml: &str) -> SesResult<Option<String>> {
    let mut request_id = None;

    walk(xml, |node| {
        if let Node::Text(path, text) = node {
            if ends_with(path, &["ResponseMetadata", "RequestId"]) {
                request_id = Some(text);
            }
        }
        Ok(())
    })?;

    Ok(request_id)
}

/// Decode an `ErrorResponse` document.
///
/// Returns `None` when the body is not an error document, leaving the caller
/// to fall back to [`AwsErrorResponse::from_status`].
pub fn parse_error_response(xml: &str) -> Option<AwsErrorResponse> {
    let mut response = AwsErrorResponse::default();

    let walked = walk(xml, |node| {
        if let Node::Text(path, text) = node {
            if ends_with(path, &["Error", "Code"]) {
                response.code = text;
            } else if ends_with(path, &["Error", "Message"]) {
                response.message = text;
            } else if ends_with(path, &["Error", "Type"]) {
                response.error_type = Some(text);
            } else if ends_with(path, &["RequestId"]) {
                response.request_id = Some(text);
            }
        }
        Ok(())
    });

    match walked {
        Ok(()) if !response.code.is_empty() => Some(response),
        _ => None,
    }
}

/// Decode a `SendRawEmailResponse`.
pub fn parse_send_raw_email(xml: &str) -> SesResult<SendRawEmailOutput> {
    let mut output = SendRawEmailOutput::default();

    walk(xml, |node| {
        if let Node::Text(path, text) = node {
            if ends_with(path, &["SendRawEmailResult", "MessageId"]) {
                output.message_id = Some(text);
            } else if ends_with(path, &["ResponseMetadata", "RequestId"]) {
                output.request_id = Some(text);
            }
        }
        Ok(())
    })?;

    Ok(output)
}

/// Decode a `ListVerifiedEmailAddressesResponse`, in document order.
pub fn parse_list_verified_email_addresses(xml: &str) -> SesResult<Vec<String>> {
    let mut addresses = Vec::new();

    walk(xml, |node| {
        if let Node::Text(path, text) = node {
            if ends_with(path, &["VerifiedEmailAddresses", "member"]) {
                addresses.push(text);
            }
        }
        Ok(())
    })?;

    Ok(addresses)
}

/// Decode a `GetSendQuotaResponse`. Missing fields read as zero.
pub fn parse_send_quota(xml: &str) -> SesResult<SendQuota> {
    let mut quota = SendQuota::default();

    walk(xml, |node| {
        if let Node::Text(path, text) = node {
            if ends_with(path, &["GetSendQuotaResult", "SentLast24Hours"]) {
                quota.sent_last_24_hours = parse_number("SentLast24Hours", &text)?;
            } else if ends_with(path, &["GetSendQuotaResult", "Max24HourSend"]) {
                quota.max_24_hour_send = parse_number("Max24HourSend", &text)?;
            } else if ends_with(path, &["GetSendQuotaResult", "MaxSendRate"]) {
                quota.max_send_rate = parse_number("MaxSendRate", &text)?;
            }
        }
        Ok(())
    })?;

    Ok(quota)
}

#[derive(Default)]
struct PartialDataPoint {
    timestamp: Option<DateTime<Utc>>,
    delivery_attempts: i64,
    rejects: i64,
    bounces: i64,
    complaints: i64,
}

/// Decode a `GetSendStatisticsResponse`, in document order.
///
/// Counters missing from a data point read as zero; a data point without a
/// `Timestamp` is an error.
pub fn parse_send_statistics(xml: &str) -> SesResult<Vec<SendDataPoint>> {
    let mut points: Vec<PartialDataPoint> = Vec::new();

    walk(xml, |node| {
        match node {
            Node::Open(path) if ends_with(path, &["SendDataPoints", "member"]) => {
                points.push(PartialDataPoint::default());
            }
            Node::Text(path, text) if path.len() >= 3 => {
                if !ends_with(&path[..path.len() - 1], &["SendDataPoints", "member"]) {
                    return Ok(());
                }
                let Some(point) = points.last_mut() else {
                    return Ok(());
                };
                let field = path[path.len() - 1].as_str();
                match field {
                    "Timestamp" => point.timestamp = Some(parse_timestamp(&text)?),
                    "DeliveryAttempts" => point.delivery_attempts = parse_number(field, &text)?,
                    "Rejects" => point.rejects = parse_number(field, &text)?,
                    "Bounces" => point.bounces = parse_number(field, &text)?,
                    "Complaints" => point.complaints = parse_number(field, &text)?,
                    _ => {}
                }
            }
            _ => {}
        }
        Ok(())
    })?;

    points
        .into_iter()
        .map(|p| {
            let timestamp = p.timestamp.ok_or_else(|| SesError::Serialization {
                message: "SendDataPoint without Timestamp".to_string(),
            })?;
            Ok(SendDataPoint {
                timestamp,
                delivery_attempts: p.delivery_attempts,
                rejects: p.rejects,
                bounces: p.bounces,
                complaints: p.complaints,
            })
        })
        .collect()
}
