//! Compact JWT token: header, payload and the verbatim signature segment
//!
//! A [`Token`] is plain data. Building one, reading claims and printing it
//! never touches key material; binding a token to a key is the job of
//! [`crate::Signer`].

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::serializer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// `iss` claim
pub const CLAIM_ISSUER: &str = "iss";
/// `sub` claim
pub const CLAIM_SUBJECT: &str = "sub";
/// `aud` claim
pub const CLAIM_AUDIENCE: &str = "aud";
/// `exp` claim
pub const CLAIM_EXPIRATION: &str = "exp";
/// `nbf` claim
pub const CLAIM_NOT_BEFORE: &str = "nbf";
/// `iat` claim
pub const CLAIM_ISSUED_AT: &str = "iat";
/// `jti` claim
pub const CLAIM_JWT_ID: &str = "jti";
/// `typ` header field
pub const CLAIM_TYPE: &str = "typ";
/// `alg` header field
pub const CLAIM_ALGORITHM: &str = "alg";
/// `cty` header field
pub const CLAIM_CONTENT_TYPE: &str = "cty";

/// A JSON Web Token in compact form.
///
/// The signature is kept exactly as it appeared in the third segment (or as
/// the last [`crate::Signer::sign`] produced it). Changing claims does not
/// clear it; printing a modified token therefore yields a token that will no
/// longer verify.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Token {
    header: Map<String, Value>,
    payload: Map<String, Value>,
    signature: String,
}

impl Token {
    /// Empty header, empty payload, empty signature.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a compact token without verifying it.
    ///
    /// Header and payload are decoded eagerly; the signature segment is kept
    /// verbatim.
    ///
    /// # Errors
    /// Returns `JwtError::Parse` if the input does not have exactly three
    /// segments or if the header or payload is not a base64url JSON object.
    pub fn parse(token: &str) -> JwtResult<Self> {
        let parts = serializer::split(token);
        match parts.len() {
            3 => {}
            n if n < 3 => return Err(JwtError::parse("not enough segments", token)),
            _ => return Err(JwtError::parse("too many segments", token)),
        }

        Ok(Self {
            header: serializer::deserialize(parts[0])?,
            payload: serializer::deserialize(parts[1])?,
            signature: parts[2].to_string(),
        })
    }

    /// Header fields.
    #[must_use]
    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    /// Mutable header fields.
    pub fn header_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.header
    }

    /// Payload claims.
    #[must_use]
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Mutable payload claims.
    pub fn payload_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.payload
    }

    /// The base64url signature segment, empty if the token was never signed.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub(crate) fn set_signature(&mut self, signature: String) {
        self.signature = signature;
    }

    /// `iss`, or `""` if absent.
    #[must_use]
    pub fn issuer(&self) -> &str {
        string_field(&self.payload, CLAIM_ISSUER)
    }

    /// Set `iss`.
    pub fn set_issuer(&mut self, issuer: impl Into<String>) -> &mut Self {
        self.payload.insert(CLAIM_ISSUER.into(), Value::String(issuer.into()));
        self
    }

    /// `sub`, or `""` if absent.
    #[must_use]
    pub fn subject(&self) -> &str {
        string_field(&self.payload, CLAIM_SUBJECT)
    }

    /// Set `sub`.
    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.payload.insert(CLAIM_SUBJECT.into(), Value::String(subject.into()));
        self
    }

    /// `aud` as a list. A scalar audience yields one entry; non-string
    /// entries are skipped.
    #[must_use]
    pub fn audience(&self) -> Vec<String> {
        match self.payload.get(CLAIM_AUDIENCE) {
            Some(Value::String(audience)) => vec![audience.clone()],
            Some(Value::Array(audiences)) => audiences
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Set `aud` to a single string.
    pub fn set_audience(&mut self, audience: impl Into<String>) -> &mut Self {
        self.payload.insert(CLAIM_AUDIENCE.into(), Value::String(audience.into()));
        self
    }

    /// Set `aud` to an array of strings.
    pub fn set_audiences<I, S>(&mut self, audiences: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let audiences = audiences
            .into_iter()
            .map(|audience| Value::String(audience.into()))
            .collect();
        self.payload.insert(CLAIM_AUDIENCE.into(), Value::Array(audiences));
        self
    }

    /// `exp`, or the epoch if absent.
    #[must_use]
    pub fn expiration(&self) -> DateTime<Utc> {
        timestamp_field(&self.payload, CLAIM_EXPIRATION)
    }

    /// Set `exp`.
    pub fn set_expiration(&mut self, expiration: DateTime<Utc>) -> &mut Self {
        self.payload.insert(CLAIM_EXPIRATION.into(), timestamp_value(expiration));
        self
    }

    /// `nbf`, or the epoch if absent.
    #[must_use]
    pub fn not_before(&self) -> DateTime<Utc> {
        timestamp_field(&self.payload, CLAIM_NOT_BEFORE)
    }

    /// Set `nbf`.
    pub fn set_not_before(&mut self, not_before: DateTime<Utc>) -> &mut Self {
        self.payload.insert(CLAIM_NOT_BEFORE.into(), timestamp_value(not_before));
        self
    }

    /// `iat`, or the epoch if absent.
    #[must_use]
    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_field(&self.payload, CLAIM_ISSUED_AT)
    }

    /// Set `iat`.
    pub fn set_issued_at(&mut self, issued_at: DateTime<Utc>) -> &mut Self {
        self.payload.insert(CLAIM_ISSUED_AT.into(), timestamp_value(issued_at));
        self
    }

    /// `jti`, or `""` if absent.
    #[must_use]
    pub fn id(&self) -> &str {
        string_field(&self.payload, CLAIM_JWT_ID)
    }

    /// Set `jti`.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.payload.insert(CLAIM_JWT_ID.into(), Value::String(id.into()));
        self
    }

    /// Header `typ`, or `""` if absent.
    #[must_use]
    pub fn token_type(&self) -> &str {
        string_field(&self.header, CLAIM_TYPE)
    }

    /// Set header `typ`.
    pub fn set_token_type(&mut self, token_type: impl Into<String>) -> &mut Self {
        self.header.insert(CLAIM_TYPE.into(), Value::String(token_type.into()));
        self
    }

    /// Header `alg` as written, or `""` if absent. Not validated.
    #[must_use]
    pub fn algorithm(&self) -> &str {
        string_field(&self.header, CLAIM_ALGORITHM)
    }

    /// Set header `alg`.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> &mut Self {
        self.header
            .insert(CLAIM_ALGORITHM.into(), Value::String(algorithm.as_str().into()));
        self
    }

    /// Header `cty`, or `""` if absent.
    #[must_use]
    pub fn content_type(&self) -> &str {
        string_field(&self.header, CLAIM_CONTENT_TYPE)
    }

    /// Set header `cty`.
    pub fn set_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.header
            .insert(CLAIM_CONTENT_TYPE.into(), Value::String(content_type.into()));
        self
    }

    /// Typed payload claim. `Ok(None)` when absent.
    ///
    /// # Errors
    /// Returns `JwtError::ClaimType` if the claim cannot be read as `T`.
    pub fn claim<T: DeserializeOwned>(&self, name: &str) -> JwtResult<Option<T>> {
        typed_field(&self.payload, name)
    }

    /// Typed header field. `Ok(None)` when absent.
    ///
    /// # Errors
    /// Returns `JwtError::ClaimType` if the field cannot be read as `T`.
    pub fn header_claim<T: DeserializeOwned>(&self, name: &str) -> JwtResult<Option<T>> {
        typed_field(&self.header, name)
    }

    /// Set an arbitrary payload claim.
    ///
    /// # Errors
    /// Returns `JwtError::ClaimType` if the value has no JSON representation.
    pub fn set_claim<T: Serialize>(&mut self, name: &str, value: T) -> JwtResult<&mut Self> {
        let value = serde_json::to_value(value)
            .map_err(|_| JwtError::claim_type(name, "representable as JSON"))?;
        self.payload.insert(name.to_string(), value);
        Ok(self)
    }

    /// Remove a payload claim, returning its previous value.
    pub fn remove_claim(&mut self, name: &str) -> Option<Value> {
        self.payload.remove(name)
    }

    /// `header "." payload "." signature` with the stored signature.
    #[must_use]
    pub fn encode(&self) -> String {
        format!(
            "{}.{}.{}",
            serializer::serialize(&self.header),
            serializer::serialize(&self.payload),
            self.signature
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Token {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::parse(s)
    }
}

fn string_field<'a>(object: &'a Map<String, Value>, name: &str) -> &'a str {
    object.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn typed_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    name: &str,
) -> JwtResult<Option<T>> {
    match object.get(name) {
        None => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|_| JwtError::claim_type(name, std::any::type_name::<T>())),
    }
}

// Whole seconds are written as integers, anything finer as fractional seconds.
fn timestamp_value(time: DateTime<Utc>) -> Value {
    let micros = time.timestamp_micros();
    if micros % 1_000_000 == 0 {
        Value::from(micros / 1_000_000)
    } else {
        Value::from(micros as f64 / 1_000_000.0)
    }
}

fn timestamp_field(object: &Map<String, Value>, name: &str) -> DateTime<Utc> {
    let Some(value) = object.get(name) else {
        return DateTime::default();
    };

    let micros = if let Some(seconds) = value.as_i64() {
        seconds.checked_mul(1_000_000)
    } else if let Some(seconds) = value.as_f64() {
        float_micros(seconds)
    } else {
        None
    };

    micros
        .and_then(DateTime::<Utc>::from_timestamp_micros)
        .unwrap_or_default()
}

// Whole and fractional parts are scaled apart; scaling the sum loses the last
// microsecond once the seconds grow past a few million.
fn float_micros(seconds: f64) -> Option<i64> {
    if !seconds.is_finite() || seconds.abs() >= (i64::MAX / 1_000_000) as f64 {
        return None;
    }
    let whole = seconds.trunc();
    let micros = ((seconds - whole) * 1_000_000.0).round() as i64;
    (whole as i64).checked_mul(1_000_000)?.checked_add(micros)
}
