use crate::canonical::{CanonicalRequest, CredentialScope, PresignQuery, StringToSign};
use crate::constants::{
    PATH_SAFE_SET, REGION, SERVICE, SIGNED_HEADERS, UNSIGNED_PAYLOAD, X_AMZ_SIGNATURE,
};
use crate::key::derive_signing_key;
use crate::Credential;
use cosops_core::hash::{hex_hmac_sha256, hex_sha256};
use cosops_core::time::{format_date, format_iso8601, now, DateTime};
use cosops_core::{Error, Result};
use http::Method;
use log::{debug, warn};
use percent_encoding::utf8_percent_encode;

/// Builder of presigned GET urls.
///
/// - [Query string authentication](https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-query-string-auth.html)
///
/// The builder holds no state besides an optional pinned clock, it can be
/// shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct PresignedUrlBuilder {
    time: Option<DateTime>,
}

impl PresignedUrlBuilder {
    /// Create a new builder that signs with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Generate a download url for `filename` valid for `expiration_seconds`.
    ///
    /// The url has the form:
    ///
    /// ```text
    /// https://<host>/<bucket>/<filename>?<encoded query>&X-Amz-Signature=<signature>
    /// ```
    ///
    /// `filename` is used verbatim in the path. Names containing reserved
    /// characters are logged at warn level but not escaped.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidCredentials`] if any credential field is empty,
    ///   checked first.
    /// - [`ErrorKind::InvalidInput`] if `expiration_seconds` is not positive.
    /// - [`ErrorKind::InvalidInput`] if `filename` is empty. This is stricter
    ///   than plain query signing, which would happily sign a link to the
    ///   bucket root (`https://<host>/<bucket>/?...`). Such a link lists
    ///   the bucket instead of downloading a file, so it is refused.
    ///
    /// [`ErrorKind::InvalidCredentials`]: cosops_core::ErrorKind::InvalidCredentials
    /// [`ErrorKind::InvalidInput`]: cosops_core::ErrorKind::InvalidInput
    pub fn generate_link(
        &self,
        filename: &str,
        cred: &Credential,
        expiration_seconds: i64,
    ) -> Result<String> {
        cred.check()?;
        if expiration_seconds <= 0 {
            return Err(Error::invalid_input(format!(
                "expiration must be positive, got {expiration_seconds}"
            )));
        }
        if filename.is_empty() {
            return Err(Error::invalid_input("filename must not be empty"));
        }
        if utf8_percent_encode(filename, &PATH_SAFE_SET).to_string() != filename {
            warn!("filename {filename:?} contains reserved characters and is used unescaped");
        }

        // Capture the clock once, both formats must come from the same instant.
        let now = self.time.unwrap_or_else(now);
        let timestamp = format_iso8601(now);
        let datestamp = format_date(now);

        let scope = CredentialScope {
            datestamp: &datestamp,
            region: REGION,
            service: SERVICE,
        };
        debug!("calculated scope: {scope}");

        let query = PresignQuery {
            access_key_id: &cred.access_key_id,
            scope,
            timestamp: &timestamp,
            expires: expiration_seconds,
            signed_headers: SIGNED_HEADERS,
        }
        .encoded();

        let resource = format!("/{}/{}", cred.bucket, filename);

        let creq = CanonicalRequest {
            method: Method::GET,
            resource: &resource,
            query: &query,
            host: &cred.host,
            signed_headers: SIGNED_HEADERS,
            payload_hash: UNSIGNED_PAYLOAD,
        }
        .to_string();
        debug!("calculated canonical request: {creq}");

        let hashed_request = hex_sha256(creq.as_bytes());
        let string_to_sign = StringToSign {
            timestamp: &timestamp,
            scope,
            hashed_request: &hashed_request,
        }
        .to_string();
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = derive_signing_key(&cred.secret_access_key, &datestamp, REGION, SERVICE)?;
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())?;

        Ok(format!(
            "https://{}{}?{}&{}={}",
            cred.host, resource, query, X_AMZ_SIGNATURE, signature
        ))
    }
}

/// Generate a presigned download url with the current time.
///
/// Shortcut of [`PresignedUrlBuilder::generate_link`].
pub fn generate_link(filename: &str, cred: &Credential, expiration_seconds: i64) -> Result<String> {
    PresignedUrlBuilder::new().generate_link(filename, cred, expiration_seconds)
}
