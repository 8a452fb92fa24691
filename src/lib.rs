//! # postman
//!
//! A command-line client for Amazon Simple Email Service.
//!
//! The crate carries its own small SES client for the Query API
//! (`2010-12-01`): configuration, a credential chain, Signature Version 4
//! signing, an HTTP transport, and XML response decoding. The `postman`
//! binary wraps six operations as subcommands:
//!
//! - `send -f SENDER TO...`: relay a raw message read from standard input
//! - `verify EMAIL...` / `delete_verified EMAIL...`: manage verified senders
//! - `list_verified`, `show_quota`, `show_stats`: account inspection
//!
//! ## Library use
//!
//! ```rust,no_run
//! use postman::{SesApi, SesClient, SesConfig, SendRawEmailRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SesConfig::builder()
//!     .region("eu-west-1")
//!     .credentials("AKIDEXAMPLE", "secret")
//!     .build()?;
//! let client = SesClient::new(config)?;
//!
//! let sent = client
//!     .send_raw_email(SendRawEmailRequest::new(
//!         "sender@example.com",
//!         vec!["rcpt@example.com".to_string()],
//!         b"Subject: hello\r\n\r\nHi".to_vec(),
//!     ))
//!     .await?;
//! println!("{:?}", sent.message_id);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod logging;
pub mod mocks;
pub mod signing;
pub mod types;
pub mod xml;

pub use client::{SesApi, SesClient};
pub use config::{ConfigOverrides, SesConfig, SesConfigBuilder};
pub use credentials::{AwsCredentials, CredentialProvider};
pub use error::{SesError, SesResult};
pub use types::{SendDataPoint, SendQuota, SendRawEmailOutput, SendRawEmailRequest};
