//! AWS Signature Version 4 signing.
//!
//! Every SES request is a form-encoded `POST /`. [`sign_request`] hashes the
//! body, adds the `x-amz-*` headers and computes the `authorization` header
//! from a canonical request over `host`, `content-type` and the `x-amz-*`
//! headers.

mod canonical;
mod error;
mod v4;

pub use canonical::{
    canonical_headers, canonical_query_string, normalize_uri_path, should_sign_header, uri_encode,
};
pub use error::SigningError;
pub use v4::{
    build_credential_scope, derive_signing_key, format_date_stamp, format_datetime, sha256_hex,
    sign_request, SigningParams, AWS_ALGORITHM, SES_SERVICE,
};
