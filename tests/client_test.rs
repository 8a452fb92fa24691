//! SesClient against a scripted transport.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{TimeZone, Utc};

use postman::client::{SesApi, SesClient};
use postman::config::SesConfig;
use postman::http::{HttpRequest, API_VERSION};
use postman::mocks::{MockResponse, MockTransport};
use postman::{SesError, SendRawEmailRequest};

fn client_with(responses: Vec<MockResponse>) -> (SesClient, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::with_responses(responses));
    let config = SesConfig::builder()
        .region("eu-west-1")
        .credentials("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
        .build()
        .unwrap();
    let client = SesClient::with_transport(config, transport.clone()).unwrap();
    (client, transport)
}

fn form(request: &HttpRequest) -> HashMap<String, String> {
    url::form_urlencoded::parse(&request.body)
        .into_owned()
        .collect()
}

const SEND_RESPONSE: &str = r#"<SendRawEmailResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <SendRawEmailResult>
    <MessageId>00000131d51d2292-159ad6eb-077c-46e6-ad09-ae7c05925ed4-000000</MessageId>
  </SendRawEmailResult>
  <ResponseMetadata>
    <RequestId>e0abcdfa-c866-11e0-b6d0-273d09173b49</RequestId>
  </ResponseMetadata>
</SendRawEmailResponse>"#;

#[tokio::test]
async fn send_raw_email_posts_signed_form() {
    let (client, transport) = client_with(vec![MockResponse::ok_with_body(SEND_RESPONSE)]);
    let message = b"From: s@x.com\r\nSubject: hi\r\n\r\nbody\r\n".to_vec();

    let output = client
        .send_raw_email(SendRawEmailRequest::new(
            "s@x.com",
            vec!["a@x.com".to_string(), "b@x.com".to_string()],
            message.clone(),
        ))
        .await
        .unwrap();

    assert_eq!(
        output.message_id.as_deref(),
        Some("00000131d51d2292-159ad6eb-077c-46e6-ad09-ae7c05925ed4-000000")
    );
    assert_eq!(
        output.request_id.as_deref(),
        Some("e0abcdfa-c866-11e0-b6d0-273d09173b49")
    );

    let request = transport.last_request().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "https://email.eu-west-1.amazonaws.com/");
    assert_eq!(request.header("host"), Some("email.eu-west-1.amazonaws.com"));
    assert!(request
        .header("authorization")
        .unwrap()
        .starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(request
        .header("authorization")
        .unwrap()
        .contains("/eu-west-1/ses/aws4_request"));
    assert!(request.header("x-amz-date").is_some());

    let params = form(&request);
    assert_eq!(params["Action"], "SendRawEmail");
    assert_eq!(params["Version"], API_VERSION);
    assert_eq!(params["Source"], "s@x.com");
    assert_eq!(params["Destinations.member.1"], "a@x.com");
    assert_eq!(params["Destinations.member.2"], "b@x.com");
    assert_eq!(STANDARD.decode(&params["RawMessage.Data"]).unwrap(), message);
}

#[tokio::test]
async fn send_raw_email_falls_back_to_header_request_id() {
    let body = "<SendRawEmailResponse><SendRawEmailResult><MessageId>m-1</MessageId></SendRawEmailResult></SendRawEmailResponse>";
    let (client, _) = client_with(vec![
        MockResponse::ok_with_body(body).with_header("x-amzn-RequestId", "hdr-req")
    ]);

    let output = client
        .send_raw_email(SendRawEmailRequest::new(
            "s@x.com",
            vec!["a@x.com".to_string()],
            b"x".to_vec(),
        ))
        .await
        .unwrap();

    assert_eq!(output.message_id.as_deref(), Some("m-1"));
    assert_eq!(output.request_id.as_deref(), Some("hdr-req"));
}

#[tokio::test]
async fn service_error_maps_to_aws_api() {
    let body = r#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <Error>
    <Type>Sender</Type>
    <Code>Throttling</Code>
    <Message>Rate exceeded</Message>
  </Error>
  <RequestId>abc-123</RequestId>
</ErrorResponse>"#;
    let (client, _) = client_with(vec![MockResponse::error(400, body)]);

    let err = client
        .send_raw_email(SendRawEmailRequest::new(
            "s@x.com",
            vec!["a@x.com".to_string()],
            b"x".to_vec(),
        ))
        .await
        .unwrap_err();

    match err {
        SesError::AwsApi {
            status,
            code,
            message,
            request_id,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, "Throttling");
            assert_eq!(message, "Rate exceeded");
            assert_eq!(request_id.as_deref(), Some("abc-123"));
        }
        other => panic!("Expected AwsApi error, got {:?}", other),
    }
}

#[tokio::test]
async fn verify_and_delete_send_email_address() {
    let (client, transport) = client_with(vec![
        MockResponse::ok_with_body("<VerifyEmailAddressResponse/>"),
        MockResponse::ok_with_body("<DeleteVerifiedEmailAddressResponse/>"),
    ]);

    client.verify_email_address("x@y.com").await.unwrap();
    client.delete_verified_email_address("z@y.com").await.unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);

    let verify = form(&requests[0]);
    assert_eq!(verify["Action"], "VerifyEmailAddress");
    assert_eq!(verify["EmailAddress"], "x@y.com");

    let delete = form(&requests[1]);
    assert_eq!(delete["Action"], "DeleteVerifiedEmailAddress");
    assert_eq!(delete["EmailAddress"], "z@y.com");
}

#[tokio::test]
async fn list_verified_email_addresses_keeps_service_order() {
    let body = r#"<ListVerifiedEmailAddressesResponse>
  <ListVerifiedEmailAddressesResult>
    <VerifiedEmailAddresses>
      <member>b@x.com</member>
      <member>a@x.com</member>
    </VerifiedEmailAddresses>
  </ListVerifiedEmailAddressesResult>
</ListVerifiedEmailAddressesResponse>"#;
    let (client, transport) = client_with(vec![MockResponse::ok_with_body(body)]);

    let addresses = client.list_verified_email_addresses().await.unwrap();

    assert_eq!(addresses, vec!["b@x.com", "a@x.com"]);
    assert_eq!(
        form(&transport.last_request().unwrap())["Action"],
        "ListVerifiedEmailAddresses"
    );
}

#[tokio::test]
async fn get_send_quota_decodes_numbers() {
    let body = r#"<GetSendQuotaResponse>
  <GetSendQuotaResult>
    <SentLast24Hours>127.0</SentLast24Hours>
    <Max24HourSend>200.0</Max24HourSend>
    <MaxSendRate>1.0</MaxSendRate>
  </GetSendQuotaResult>
</GetSendQuotaResponse>"#;
    let (client, _) = client_with(vec![MockResponse::ok_with_body(body)]);

    let quota = client.get_send_quota().await.unwrap();

    assert_eq!(quota.sent_last_24_hours, 127.0);
    assert_eq!(quota.max_24_hour_send, 200.0);
    assert_eq!(quota.max_send_rate, 1.0);
}

#[tokio::test]
async fn get_send_statistics_decodes_points() {
    let body = r#"<GetSendStatisticsResponse>
  <GetSendStatisticsResult>
    <SendDataPoints>
      <member>
        <DeliveryAttempts>8</DeliveryAttempts>
        <Timestamp>2011-08-03T19:23:00Z</Timestamp>
        <Rejects>0</Rejects>
        <Bounces>0</Bounces>
        <Complaints>0</Complaints>
      </member>
      <member>
        <DeliveryAttempts>7</DeliveryAttempts>
        <Timestamp>2011-08-03T06:53:00Z</Timestamp>
        <Rejects>0</Rejects>
        <Bounces>1</Bounces>
        <Complaints>0</Complaints>
      </member>
    </SendDataPoints>
  </GetSendStatisticsResult>
</GetSendStatisticsResponse>"#;
    let (client, _) = client_with(vec![MockResponse::ok_with_body(body)]);

    let points = client.get_send_statistics().await.unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].delivery_attempts, 8);
    assert_eq!(
        points[1].timestamp,
        Utc.with_ymd_and_hms(2011, 8, 3, 6, 53, 0).unwrap()
    );
    assert_eq!(points[1].bounces, 1);
}

#[tokio::test]
async fn transport_failure_is_not_a_service_error() {
    let (client, _) = client_with(Vec::new());

    let err = client.get_send_quota().await.unwrap_err();

    assert!(!err.is_service_error());
    assert!(matches!(err, SesError::Transport { .. }));
}
