//! Builders for the strings covered by a presigned url signature.
//!
//! Each type renders the exact bytes the service recomputes on its side, so
//! field order and separators are fixed by the `Display` impls below.

use crate::constants::{
    ALGORITHM, QUERY_ENCODE_SET, TERMINATOR, X_AMZ_ALGORITHM, X_AMZ_CREDENTIAL, X_AMZ_DATE,
    X_AMZ_EXPIRES, X_AMZ_SIGNED_HEADERS,
};
use http::Method;
use percent_encoding::utf8_percent_encode;
use std::fmt::{self, Display, Formatter};

/// Scope a signature is bound to: `<date>/<region>/<service>/aws4_request`.
#[derive(Debug, Clone, Copy)]
pub struct CredentialScope<'a> {
    pub datestamp: &'a str,
    pub region: &'a str,
    pub service: &'a str,
}

impl Display for CredentialScope<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.datestamp, self.region, self.service, TERMINATOR
        )
    }
}

/// The standardized query string of a presigned url, before encoding.
///
/// Parameters are always rendered in this order:
///
/// ```text
/// X-Amz-Algorithm=AWS4-HMAC-SHA256
/// &X-Amz-Credential=<access_key_id>/<scope>
/// &X-Amz-Date=<timestamp>
/// &X-Amz-Expires=<seconds>
/// &X-Amz-SignedHeaders=<signed headers>
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PresignQuery<'a> {
    pub access_key_id: &'a str,
    pub scope: CredentialScope<'a>,
    pub timestamp: &'a str,
    pub expires: i64,
    pub signed_headers: &'a str,
}

impl PresignQuery<'_> {
    /// Query parameters in signing order.
    pub fn params(&self) -> [(&'static str, String); 5] {
        [
            (X_AMZ_ALGORITHM, ALGORITHM.to_string()),
            (
                X_AMZ_CREDENTIAL,
                format!("{}/{}", self.access_key_id, self.scope),
            ),
            (X_AMZ_DATE, self.timestamp.to_string()),
            (X_AMZ_EXPIRES, self.expires.to_string()),
            (X_AMZ_SIGNED_HEADERS, self.signed_headers.to_string()),
        ]
    }

    /// Render and encode the query, ready to be signed and appended to the url.
    pub fn encoded(&self) -> String {
        encode_query(&self.to_string())
    }
}

impl Display for PresignQuery<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (idx, (k, v)) in self.params().iter().enumerate() {
            if idx > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

/// Percent-encode a whole query string, leaving `&` and `=` untouched.
pub fn encode_query(query: &str) -> String {
    utf8_percent_encode(query, &QUERY_ENCODE_SET).to_string()
}

/// Canonical request, seven lines joined by `\n`:
///
/// ```text
/// GET
/// /<bucket>/<filename>
/// <encoded query>
/// host:<host>
///
/// host
/// UNSIGNED-PAYLOAD
/// ```
#[derive(Debug)]
pub struct CanonicalRequest<'a> {
    pub method: Method,
    pub resource: &'a str,
    pub query: &'a str,
    pub host: &'a str,
    pub signed_headers: &'a str,
    pub payload_hash: &'a str,
}

impl Display for CanonicalRequest<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.resource)?;
        writeln!(f, "{}", self.query)?;
        writeln!(f, "host:{}", self.host)?;
        // No other canonical headers.
        writeln!(f)?;
        writeln!(f, "{}", self.signed_headers)?;
        write!(f, "{}", self.payload_hash)
    }
}

/// String to sign, four lines joined by `\n`:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313//s3/aws4_request
/// <hashed_canonical_request>
/// ```
#[derive(Debug)]
pub struct StringToSign<'a> {
    pub timestamp: &'a str,
    pub scope: CredentialScope<'a>,
    pub hashed_request: &'a str,
}

impl Display for StringToSign<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{ALGORITHM}")?;
        writeln!(f, "{}", self.timestamp)?;
        writeln!(f, "{}", self.scope)?;
        write!(f, "{}", self.hashed_request)
    }
}
