//! JWS algorithm identifiers

use crate::error::JwtError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Digest strength backing an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestStrength {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl DigestStrength {
    /// Digest output length in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            DigestStrength::Sha256 => 32,
            DigestStrength::Sha384 => 48,
            DigestStrength::Sha512 => 64,
        }
    }
}

/// Key type an algorithm requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFamily {
    /// Shared secret
    Hmac,
    /// RSA key pair
    Rsa,
    /// Elliptic curve key pair
    Ec,
}

impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFamily::Hmac => f.write_str("HMAC"),
            KeyFamily::Rsa => f.write_str("RSA"),
            KeyFamily::Ec => f.write_str("EC"),
        }
    }
}

/// Signature algorithm carried in the `alg` header.
///
/// `None` is the unsecured JWS algorithm. It is never part of a signer's
/// default allow-list and never added by [`crate::Signer::add_all_algorithms`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    /// Unsecured token, empty signature
    None,
    /// HMAC using SHA-256
    HS256,
    /// HMAC using SHA-384
    HS384,
    /// HMAC using SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// ECDSA using SHA-256
    ES256,
    /// ECDSA using SHA-384
    ES384,
    /// ECDSA using SHA-512
    ES512,
}

impl Algorithm {
    /// Every signing algorithm. Excludes [`Algorithm::None`].
    pub const ALL: [Algorithm; 9] = [
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
        Algorithm::RS384,
        Algorithm::RS512,
        Algorithm::ES256,
        Algorithm::ES384,
        Algorithm::ES512,
    ];

    /// The exact `alg` header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::HS256 => "HS256",
            Algorithm::HS384 => "HS384",
            Algorithm::HS512 => "HS512",
            Algorithm::RS256 => "RS256",
            Algorithm::RS384 => "RS384",
            Algorithm::RS512 => "RS512",
            Algorithm::ES256 => "ES256",
            Algorithm::ES384 => "ES384",
            Algorithm::ES512 => "ES512",
        }
    }

    /// Digest strength, `None` for the unsecured algorithm.
    #[must_use]
    pub const fn digest(self) -> Option<DigestStrength> {
        match self {
            Algorithm::None => None,
            Algorithm::HS256 | Algorithm::RS256 | Algorithm::ES256 => Some(DigestStrength::Sha256),
            Algorithm::HS384 | Algorithm::RS384 | Algorithm::ES384 => Some(DigestStrength::Sha384),
            Algorithm::HS512 | Algorithm::RS512 | Algorithm::ES512 => Some(DigestStrength::Sha512),
        }
    }

    /// Key family, `None` for the unsecured algorithm.
    #[must_use]
    pub const fn key_family(self) -> Option<KeyFamily> {
        match self {
            Algorithm::None => None,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Some(KeyFamily::Hmac),
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => Some(KeyFamily::Rsa),
            Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512 => Some(KeyFamily::Ec),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Algorithm::None),
            "HS256" => Ok(Algorithm::HS256),
            "HS384" => Ok(Algorithm::HS384),
            "HS512" => Ok(Algorithm::HS512),
            "RS256" => Ok(Algorithm::RS256),
            "RS384" => Ok(Algorithm::RS384),
            "RS512" => Ok(Algorithm::RS512),
            "ES256" => Ok(Algorithm::ES256),
            "ES384" => Ok(Algorithm::ES384),
            "ES512" => Ok(Algorithm::ES512),
            other => Err(JwtError::unsupported_algorithm(other)),
        }
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
