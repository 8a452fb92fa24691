//! Command handlers driven through `dispatch` with a scripted SES API.

use chrono::{TimeZone, Utc};
use clap::Parser;
use rstest::rstest;

use postman::cli::{dispatch, Cli, Commands, Outcome};
use postman::mocks::{MockCall, MockSesApi, MOCK_MESSAGE_ID, MOCK_REQUEST_ID};
use postman::{SendDataPoint, SendQuota, SendRawEmailOutput, SesError};

async fn run(api: &MockSesApi, args: &[&str], stdin: &[u8]) -> (anyhow::Result<Outcome>, Vec<String>) {
    let cli = Cli::try_parse_from(args).unwrap();
    let mut input = stdin;
    let mut out = Vec::new();
    let result = dispatch(api, &cli, &mut input, &mut out).await;
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    (result, lines)
}

fn point(hour: u32, attempts: i64) -> SendDataPoint {
    SendDataPoint {
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, hour, 15, 0).unwrap(),
        delivery_attempts: attempts,
        rejects: 0,
        bounces: 0,
        complaints: 0,
    }
}

#[rstest]
#[case(&["postman", "send", "-f", "s@x.com", "a@x.com"], "post_to=a@x.com")]
#[case(&["postman", "send", "-f", "s@x.com", "a@x.com", "b@x.com", "c@x.com"], "post_to=a@x.com")]
#[case(&["postman", "-v", "send", "-f", "s@x.com", "a@x.com"], "post_to=a@x.com")]
#[case(
    &["postman", "-v", "send", "-f", "s@x.com", "a@x.com", "b@x.com", "c@x.com"],
    "post_to=a@x.com post_to=b@x.com post_to=c@x.com"
)]
#[case(
    &["postman", "send", "-f", "s@x.com", "c@x.com", "a@x.com", "--verbose"],
    "post_to=c@x.com post_to=a@x.com"
)]
#[tokio::test]
async fn send_reports_recipients(#[case] args: &[&str], #[case] expected_to: &str) {
    let api = MockSesApi::new();

    let (result, lines) = run(&api, args, b"Subject: t\r\n\r\nbody").await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(
        lines,
        vec![format!(
            "post_status=OK msgid={} reqid={} post_from=s@x.com {}",
            MOCK_MESSAGE_ID, MOCK_REQUEST_ID, expected_to
        )]
    );
}

#[tokio::test]
async fn send_service_error_exits_one() {
    let api = MockSesApi::new().with_send_result(Err(SesError::AwsApi {
        status: 400,
        code: "Throttling".to_string(),
        message: "Rate exceeded".to_string(),
        request_id: Some("abc-123".to_string()),
    }));

    let (result, lines) = run(&api, &["postman", "send", "-f", "s@x.com", "a@x.com"], b"x").await;

    let outcome = result.unwrap();
    assert_eq!(outcome, Outcome::Failure);
    assert_eq!(outcome.code(), 1);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("post_status=ERROR"));
    assert!(lines[0].contains("http_status=400"));
    assert!(lines[0].contains("errcode=Throttling"));
    assert!(lines[0].contains("errmsg=\"Rate exceeded\""));
    assert!(lines[0].contains("reqid=abc-123"));
}

#[tokio::test]
async fn send_from_mailer_daemon_is_ignored() {
    let api = MockSesApi::new();

    let (result, lines) = run(
        &api,
        &["postman", "send", "-f", "MAILER-DAEMON", "a@x.com", "b@x.com"],
        b"bounce body",
    )
    .await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(
        lines,
        vec!["post_status=IGNORE post_from=MAILER-DAEMON post_to=a@x.com"]
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn send_without_message_id_is_not_sent() {
    let api = MockSesApi::new().with_send_result(Ok(SendRawEmailOutput {
        message_id: None,
        request_id: Some("r-9".to_string()),
    }));

    let (result, lines) = run(&api, &["postman", "send", "-f", "s@x.com", "a@x.com"], b"x").await;

    assert_eq!(result.unwrap(), Outcome::Failure);
    assert_eq!(
        lines,
        vec!["post_status=NOTSENT reqid=r-9 post_from=s@x.com post_to=a@x.com"]
    );
}

#[tokio::test]
async fn verify_calls_in_input_order() {
    let api = MockSesApi::new();

    let (result, lines) = run(&api, &["postman", "verify", "x@y.com", "z@y.com"], b"").await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(
        api.calls(),
        vec![
            MockCall::VerifyEmailAddress("x@y.com".to_string()),
            MockCall::VerifyEmailAddress("z@y.com".to_string()),
        ]
    );
    assert_eq!(
        lines,
        vec!["Verification for x@y.com sent.", "Verification for z@y.com sent."]
    );
}

#[tokio::test]
async fn verify_aborts_on_first_error() {
    let api = MockSesApi::new().with_verify_result(Err(SesError::AwsApi {
        status: 400,
        code: "InvalidParameterValue".to_string(),
        message: "Invalid email address".to_string(),
        request_id: None,
    }));

    let (result, lines) = run(&api, &["postman", "verify", "bad", "z@y.com"], b"").await;

    assert!(result.is_err());
    assert!(lines.is_empty());
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn list_verified_sorts_addresses() {
    let api = MockSesApi::new().with_verified_addresses(["b@x.com", "a@x.com"]);

    let (result, lines) = run(&api, &["postman", "list_verified"], b"").await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(lines, vec!["a@x.com", "b@x.com"]);
}

#[tokio::test]
async fn list_verified_empty_prints_one_line() {
    let api = MockSesApi::new();

    let (_, lines) = run(&api, &["postman", "list_verified"], b"").await;

    assert_eq!(lines, vec!["No addresses are verified on this account."]);
}

#[tokio::test]
async fn show_quota_prints_integer_table() {
    let api = MockSesApi::new().with_quota(SendQuota {
        sent_last_24_hours: 12.0,
        max_24_hour_send: 50000.0,
        max_send_rate: 14.0,
    });

    let (result, lines) = run(&api, &["postman", "show_quota"], b"").await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("SentLast24Hours Max24HourSend   MaxSendRate"));
    assert_eq!(
        lines[1].split_whitespace().collect::<Vec<_>>(),
        vec!["12", "50000", "14"]
    );
}

#[tokio::test]
async fn show_stats_orders_by_timestamp() {
    let api = MockSesApi::new().with_statistics(vec![point(9, 3), point(1, 1), point(5, 2)]);

    let (result, lines) = run(&api, &["postman", "show_stats"], b"").await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Timestamp"));
    assert!(lines[1].starts_with("2024-03-01T01:15:00Z"));
    assert!(lines[2].starts_with("2024-03-01T05:15:00Z"));
    assert!(lines[3].starts_with("2024-03-01T09:15:00Z"));
}

#[tokio::test]
async fn delete_verified_confirms_each_address() {
    let api = MockSesApi::new();

    let (result, lines) = run(&api, &["postman", "delete_verified", "a@x.com", "b@x.com"], b"").await;

    assert_eq!(result.unwrap(), Outcome::Success);
    assert_eq!(lines, vec!["Deleted a@x.com", "Deleted b@x.com"]);
    assert_eq!(
        api.calls(),
        vec![
            MockCall::DeleteVerifiedEmailAddress("a@x.com".to_string()),
            MockCall::DeleteVerifiedEmailAddress("b@x.com".to_string()),
        ]
    );
}

#[test]
fn parse_send_arguments() {
    let cli = Cli::try_parse_from(["postman", "send", "-f", "s@x.com", "a@x.com", "b@x.com"]).unwrap();

    assert!(!cli.verbose);
    assert_eq!(
        cli.command,
        Commands::Send {
            from: "s@x.com".to_string(),
            destinations: vec!["a@x.com".to_string(), "b@x.com".to_string()],
        }
    );
}

#[test]
fn parse_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "postman",
        "show_quota",
        "--region",
        "eu-west-1",
        "--endpoint-url",
        "http://localhost:4566",
        "-v",
    ])
    .unwrap();

    assert!(cli.verbose);
    assert_eq!(cli.command, Commands::ShowQuota);

    let overrides = cli.overrides();
    assert_eq!(overrides.region.as_deref(), Some("eu-west-1"));
    assert_eq!(overrides.endpoint.as_deref(), Some("http://localhost:4566"));
}

#[rstest]
#[case(&["postman", "send", "a@x.com"])]
#[case(&["postman", "send", "-f", "s@x.com"])]
#[case(&["postman", "verify"])]
#[case(&["postman", "delete_verified"])]
#[case(&["postman", "list-verified"])]
#[case(&["postman"])]
fn parse_rejects_incomplete_invocations(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}
