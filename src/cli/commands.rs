//! Subcommand handlers.
//!
//! Each handler issues its SES call(s) through [`SesApi`], writes its text to
//! `out`, and reports an [`Outcome`]. Errors other than a service rejection
//! on `send` are returned to the caller untouched.

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, warn};

use super::args::{Cli, Commands};
use super::output;
use crate::client::SesApi;
use crate::error::SesError;
use crate::types::SendRawEmailRequest;

/// Sender that marks bounce traffic; such messages are never relayed.
pub const MAILER_DAEMON: &str = "MAILER-DAEMON";

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit status 0.
    Success,
    /// Exit status 1: rejected or not sent.
    Failure,
}

impl Outcome {
    /// Numeric process exit status.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        ExitCode::from(outcome.code())
    }
}

/// Run the parsed command against `api`.
///
/// `input` is only read by `send`.
pub async fn dispatch<A, R, W>(api: &A, cli: &Cli, input: &mut R, out: &mut W) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    R: AsyncRead + Unpin,
    W: Write,
{
    match &cli.command {
        Commands::Send { from, destinations } => {
            send(api, from, destinations, cli.verbose, input, out).await
        }
        Commands::Verify { email } => verify(api, email, out).await,
        Commands::ListVerified => list_verified(api, out).await,
        Commands::ShowQuota => show_quota(api, out).await,
        Commands::ShowStats => show_stats(api, out).await,
        Commands::DeleteVerified { email } => delete_verified(api, email, out).await,
    }
}

/// Relay the raw message on `input` from `from` to `destinations`.
pub async fn send<A, R, W>(
    api: &A,
    from: &str,
    destinations: &[String],
    verbose: bool,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut raw_message = Vec::new();
    input
        .read_to_end(&mut raw_message)
        .await
        .context("failed to read message from standard input")?;
    debug!(size = raw_message.len(), "read raw message");

    let details = output::send_details(from, destinations, verbose);

    if from == MAILER_DAEMON {
        info!("not relaying message from {}", MAILER_DAEMON);
        writeln!(out, "{}", output::send_ignored(&details))?;
        return Ok(Outcome::Success);
    }

    let request = SendRawEmailRequest::new(from, destinations.to_vec(), raw_message);

    match api.send_raw_email(request).await {
        Ok(sent) => match sent.message_id.as_deref() {
            Some(message_id) => {
                writeln!(
                    out,
                    "{}",
                    output::send_ok(Some(message_id), sent.request_id.as_deref(), &details)
                )?;
                Ok(Outcome::Success)
            }
            None => {
                warn!("SES returned no message id");
                writeln!(
                    out,
                    "{}",
                    output::send_not_sent(sent.request_id.as_deref(), &details)
                )?;
                Ok(Outcome::Failure)
            }
        },
        Err(SesError::AwsApi {
            status,
            code,
            message,
            request_id,
        }) => {
            warn!(status, code = %code, "send rejected");
            writeln!(
                out,
                "{}",
                output::send_error(status, &message, &code, request_id.as_deref(), &details)
            )?;
            Ok(Outcome::Failure)
        }
        Err(err) => Err(err.into()),
    }
}

/// Request verification of each address in order.
pub async fn verify<A, W>(api: &A, emails: &[String], out: &mut W) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    W: Write,
{
    for email in emails {
        api.verify_email_address(email).await?;
        writeln!(out, "{}", output::verification_sent(email))?;
    }
    Ok(Outcome::Success)
}

/// Print verified addresses, sorted.
pub async fn list_verified<A, W>(api: &A, out: &mut W) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    W: Write,
{
    let mut addresses = api.list_verified_email_addresses().await?;

    if addresses.is_empty() {
        writeln!(out, "{}", output::NO_VERIFIED_ADDRESSES)?;
        return Ok(Outcome::Success);
    }

    addresses.sort();
    for address in &addresses {
        writeln!(out, "{}", address)?;
    }
    Ok(Outcome::Success)
}

/// Print the sending quota table.
pub async fn show_quota<A, W>(api: &A, out: &mut W) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    W: Write,
{
    let quota = api.get_send_quota().await?;
    for line in output::quota_table(&quota) {
        writeln!(out, "{}", line)?;
    }
    Ok(Outcome::Success)
}

/// Print sending statistics in timestamp order.
pub async fn show_stats<A, W>(api: &A, out: &mut W) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    W: Write,
{
    let mut points = api.get_send_statistics().await?;
    points.sort_by_key(|point| point.timestamp);

    writeln!(out, "{}", output::stats_header())?;
    for point in &points {
        writeln!(out, "{}", output::stats_row(point))?;
    }
    Ok(Outcome::Success)
}

/// Delete each address from the verified list in order.
pub async fn delete_verified<A, W>(api: &A, emails: &[String], out: &mut W) -> anyhow::Result<Outcome>
where
    A: SesApi + ?Sized,
    W: Write,
{
    for email in emails {
        api.delete_verified_email_address(email).await?;
        writeln!(out, "{}", output::deleted(email))?;
    }
    Ok(Outcome::Success)
}
