//! Request signing.
//!
//! When a client secret is configured every request carries two headers:
//!
//! ```text
//! X-Veryfi-Request-Timestamp: {unix_timestamp}
//! X-Veryfi-Request-Signature: base64(HMAC-SHA256(string_to_sign, secret))
//! ```
//!
//! The string to sign is `timestamp:{ts}` followed by `,{key}:{value}` for
//! every request parameter in insertion order. Values use
//! [`plain_string`](crate::params::plain_string).

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use log::debug;
use sha2::Sha256;

use crate::params::{plain_string, RequestParams};

/// Header carrying the Unix timestamp the signature was computed for.
pub const TIMESTAMP_HEADER: &str = "X-Veryfi-Request-Timestamp";

/// Header carrying the base64 request signature.
pub const SIGNATURE_HEADER: &str = "X-Veryfi-Request-Signature";

/// Build the canonical string the signature is computed over.
pub fn string_to_sign(payload: &RequestParams, timestamp: i64) -> String {
    let mut s = format!("timestamp:{timestamp}");
    for (key, value) in payload.iter() {
        s.push(',');
        s.push_str(key);
        s.push(':');
        s.push_str(&plain_string(value));
    }
    s
}

/// Sign `payload` at `timestamp` with `secret`.
///
/// Pure: identical inputs always produce the identical signature.
pub fn sign(payload: &RequestParams, secret: &str, timestamp: i64) -> String {
    let content = string_to_sign(payload, timestamp);
    debug!(
        "signing {} parameter(s) at timestamp {timestamp}",
        payload.len()
    );

    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    h.update(content.as_bytes());

    BASE64_STANDARD
        .encode(h.finalize().into_bytes())
        .trim()
        .to_string()
}
