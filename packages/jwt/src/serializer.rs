//! Compact claim-set serialization (RFC 7515 base64url, no padding)

use crate::error::{JwtError, JwtResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::{Map, Value};

/// Base64 URL-safe encoding without padding
#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Base64 URL-safe decoding without padding
#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Stringify a JSON object and base64url-encode it.
///
/// Keys come out in sorted order, so equal claim sets always produce the
/// same segment.
#[must_use]
pub fn serialize(object: &Map<String, Value>) -> String {
    // A `Value` holds string keys and finite numbers only, so writing it into
    // a `Vec` cannot fail.
    let json = serde_json::to_vec(object).unwrap_or_default();
    base64_url_encode(&json)
}

/// Decode a base64url segment and parse it as a JSON object.
///
/// # Errors
/// Returns `JwtError::Parse` if the segment is not base64url, not JSON, or
/// JSON that is not an object.
pub fn deserialize(segment: &str) -> JwtResult<Map<String, Value>> {
    let bytes = base64_url_decode(segment)
        .map_err(|e| JwtError::parse(&format!("invalid base64url ({e})"), segment))?;

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(JwtError::parse("segment is not a JSON object", segment)),
        Err(e) => Err(JwtError::parse(&format!("invalid JSON ({e})"), segment)),
    }
}

/// Split a compact token on `.` without validating the segments.
///
/// A trailing dot yields a trailing empty segment.
#[must_use]
pub fn split(token: &str) -> Vec<&str> {
    token.split('.').collect()
}
