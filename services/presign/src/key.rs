use crate::constants::TERMINATOR;
use cosops_core::hash::{hmac_sha256, SHA256_LEN};
use cosops_core::Result;

/// Derive the signing key for one credential scope.
///
/// Every step's output is the key of the next step:
///
/// ```text
/// k_date    = HMAC("AWS4" + secret, datestamp)
/// k_region  = HMAC(k_date, region)
/// k_service = HMAC(k_region, service)
/// k_signing = HMAC(k_service, "aws4_request")
/// ```
///
/// The key is recomputed for every signature, it is bound to the date and
/// must not outlive it.
pub fn derive_signing_key(
    secret: &str,
    datestamp: &str,
    region: &str,
    service: &str,
) -> Result<[u8; SHA256_LEN]> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), datestamp.as_bytes())?;
    // Sign region
    let sign_region = hmac_sha256(&sign_date, region.as_bytes())?;
    // Sign service
    let sign_service = hmac_sha256(&sign_region, service.as_bytes())?;
    // Sign request
    hmac_sha256(&sign_service, TERMINATOR.as_bytes())
}
