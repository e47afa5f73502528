use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Signing algorithm name, used both in the query and the string to sign.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
/// Service name bound into the credential scope.
pub const SERVICE: &str = "s3";
/// Terminal element of the credential scope and of the key derivation chain.
pub const TERMINATOR: &str = "aws4_request";
/// Region bound into the credential scope.
///
/// The target service runs in a single unnamed region, so the scope carries
/// an empty segment: `20130524//s3/aws4_request`.
pub const REGION: &str = "";
/// Payload hash sentinel, the body is never part of a presigned GET.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
/// The only header covered by the signature.
pub const SIGNED_HEADERS: &str = "host";

// Query parameters carried by a presigned url.
pub const X_AMZ_ALGORITHM: &str = "X-Amz-Algorithm";
pub const X_AMZ_CREDENTIAL: &str = "X-Amz-Credential";
pub const X_AMZ_DATE: &str = "X-Amz-Date";
pub const X_AMZ_EXPIRES: &str = "X-Amz-Expires";
pub const X_AMZ_SIGNED_HEADERS: &str = "X-Amz-SignedHeaders";
pub const X_AMZ_SIGNATURE: &str = "X-Amz-Signature";

/// AsciiSet used to encode the whole standardized query string.
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Keep '&' and '=' so the parameter structure survives.
/// - '/' is encoded.
pub static QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'&')
    .remove(b'=');

/// AsciiSet of characters a filename can hold without needing escaping in a path.
///
/// Filenames are inserted into the path verbatim, this set is only used to
/// warn about names that may not match what the service signs.
pub static PATH_SAFE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
