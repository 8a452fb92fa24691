//! Test doubles for the transport and the SES API.

mod ses_api;
mod transport;

pub use ses_api::{MockCall, MockSesApi, MOCK_MESSAGE_ID, MOCK_REQUEST_ID};
pub use transport::{MockResponse, MockTransport};
