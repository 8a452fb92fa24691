//! Query API request construction.

use crate::signing::canonical_query_string;

/// Query API version spoken by this client.
pub const API_VERSION: &str = "2010-12-01";

/// Content type of every Query API request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// A single SES Query API call: an action name plus its parameters.
///
/// # Examples
///
/// ```
/// use postman::http::SesRequest;
///
/// let request = SesRequest::action("SendRawEmail")
///     .param("Source", "sender@example.com")
///     .member_list("Destinations", &["a@example.com", "b@example.com"]);
///
/// assert_eq!(
///     request.form_body(),
///     "Action=SendRawEmail&Destinations.member.1=a%40example.com\
///      &Destinations.member.2=b%40example.com&Source=sender%40example.com\
///      &Version=2010-12-01"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SesRequest {
    action: String,
    params: Vec<(String, String)>,
}

impl SesRequest {
    /// Start a request for the named action.
    pub fn action(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            params: Vec::new(),
        }
    }

    /// Add a scalar parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Add a list parameter as `{name}.member.1`, `{name}.member.2`, ...
    pub fn member_list<S: AsRef<str>>(mut self, name: &str, values: &[S]) -> Self {
        for (index, value) in values.iter().enumerate() {
            self.params.push((
                format!("{}.member.{}", name, index + 1),
                value.as_ref().to_string(),
            ));
        }
        self
    }

    /// The action name.
    pub fn action_name(&self) -> &str {
        &self.action
    }

    /// Value of a parameter, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All parameters including `Action` and `Version`.
    pub fn form_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.params.len() + 2);
        params.push(("Action".to_string(), self.action.clone()));
        params.push(("Version".to_string(), API_VERSION.to_string()));
        params.extend(self.params.iter().cloned());
        params
    }

    /// The `application/x-www-form-urlencoded` request body, keys sorted.
    pub fn form_body(&self) -> String {
        canonical_query_string(&self.form_params())
    }
}
