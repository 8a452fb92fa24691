//! HTTP plumbing for the SES Query API.
//!
//! ```text
//! SesRequest ──form body──▶ SesHttpClient ──signed HttpRequest──▶ Transport
//!                               ▲                                    │
//!                               └────────── SesResponse ◀────────────┘
//! ```

mod client;
mod request;
mod response;
mod transport;

pub use client::SesHttpClient;
pub use request::{SesRequest, API_VERSION, FORM_CONTENT_TYPE};
pub use response::{SesResponse, REQUEST_ID_HEADER};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
