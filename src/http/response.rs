//! Response wrapper for SES Query API replies.

use http::StatusCode;
use std::collections::HashMap;

use crate::error::{map_aws_error, AwsErrorResponse, SesError, SesResult};
use crate::xml;

use super::transport::HttpResponse;

/// Header carrying the request ID on every SES reply.
pub const REQUEST_ID_HEADER: &str = "x-amzn-requestid";

/// A reply from SES: status, headers and the raw XML body.
#[derive(Debug, Clone)]
pub struct SesResponse {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl SesResponse {
    /// Create a response. Header names are matched case-insensitively.
    ///
    /// ```rust
    /// use postman::http::SesResponse;
    /// use http::StatusCode;
    /// use std::collections::HashMap;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("X-Amzn-RequestId".to_string(), "abc-123".to_string());
    ///
    /// let response = SesResponse::new(StatusCode::OK, headers, vec![]);
    /// assert!(response.is_success());
    /// assert_eq!(response.request_id(), Some("abc-123"));
    /// ```
    pub fn new(status: StatusCode, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Wrap a transport-level response.
    pub fn from_http(response: HttpResponse) -> SesResult<Self> {
        let status = StatusCode::from_u16(response.status).map_err(|e| SesError::Transport {
            message: format!("Invalid HTTP status {}: {}", response.status, e),
            source: None,
        })?;

        Ok(Self::new(status, response.headers, response.body))
    }

    /// HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Header value by name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text.
    pub fn body_string(&self) -> SesResult<&str> {
        std::str::from_utf8(&self.body).map_err(|e| SesError::Serialization {
            message: format!("Response body is not valid UTF-8: {}", e),
        })
    }

    /// Request ID from the `x-amzn-requestid` header.
    pub fn request_id(&self) -> Option<&str> {
        self.header(REQUEST_ID_HEADER)
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turn an unsuccessful reply into [`SesError::AwsApi`].
    ///
    /// The body's `ErrorResponse` document supplies code and message when
    /// present; otherwise they are derived from the status. The request ID
    /// comes from the document, falling back to the response header.
    ///
    /// ```rust
    /// use postman::http::SesResponse;
    /// use http::StatusCode;
    /// use std::collections::HashMap;
    ///
    /// let body = b"<ErrorResponse><Error><Code>MessageRejected</Code>\
    ///     <Message>Email address is not verified.</Message></Error>\
    ///     <RequestId>abc-123</RequestId></ErrorResponse>".to_vec();
    ///
    /// let error = SesResponse::new(StatusCode::BAD_REQUEST, HashMap::new(), body).into_error();
    /// assert_eq!(error.error_code(), Some("MessageRejected"));
    /// assert_eq!(error.request_id(), Some("abc-123"));
    /// ```
    pub fn into_error(self) -> SesError {
        let header_request_id = self.request_id().map(str::to_string);
        let status = self.status.as_u16();

        let mut response = std::str::from_utf8(&self.body)
            .ok()
            .and_then(xml::parse_error_response)
            .unwrap_or_else(|| AwsErrorResponse::from_status(status, None));

        if response.request_id.is_none() {
            response.request_id = header_request_id;
        }

        map_aws_error(&response, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/xml".to_string());
        let response = SesResponse::new(StatusCode::OK, headers, Vec::new());

        assert_eq!(response.header("content-type"), Some("text/xml"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("text/xml"));
    }

    #[test]
    fn test_into_error_from_document() {
        let body = br#"<ErrorResponse xmlns="http://ses.amazonaws.com/doc/2010-12-01/">
  <Error><Type>Sender</Type><Code>Throttling</Code><Message>Rate exceeded</Message></Error>
  <RequestId>abc-123</RequestId>
</ErrorResponse>"#
            .to_vec();

        let error = SesResponse::new(StatusCode::BAD_REQUEST, HashMap::new(), body).into_error();

        match error {
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
            other => panic!("Expected AwsApi, got {:?}", other),
        }
    }

    #[test]
    fn test_into_error_falls_back_to_status_and_header() {
        let mut headers = HashMap::new();
        headers.insert(REQUEST_ID_HEADER.to_string(), "hdr-1".to_string());
        let body = b"<html>Bad Gateway</html>".to_vec();

        let error = SesResponse::new(StatusCode::BAD_GATEWAY, headers, body).into_error();

        assert_eq!(error.status(), Some(502));
        assert_eq!(error.error_code(), Some("ServiceUnavailable"));
        assert_eq!(error.request_id(), Some("hdr-1"));
        assert!(error.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_from_http() {
        let response = SesResponse::from_http(HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: b"<ok/>".to_vec(),
        })
        .unwrap();

        assert!(response.is_success());
        assert_eq!(response.body_string().unwrap(), "<ok/>");
    }
}
