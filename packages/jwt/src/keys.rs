//! Key handles accepted by the signer
//!
//! The crate never loads key material itself. Callers parse PEM/DER with the
//! `rsa`, `p256` and `p384` decoders and hand the resulting handles over.

use crate::algorithm::{Algorithm, KeyFamily};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Shared HMAC secret, wiped on drop.
#[derive(Clone)]
pub struct HmacSecret(Zeroizing<Vec<u8>>);

impl HmacSecret {
    /// Wrap secret bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    /// Secret bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Secret length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for HmacSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HmacSecret([REDACTED; {}])", self.0.len())
    }
}

impl From<&str> for HmacSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes())
    }
}

impl From<&[u8]> for HmacSecret {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret)
    }
}

impl From<Vec<u8>> for HmacSecret {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

/// RSA key handle. A public key can only verify.
#[derive(Clone, Debug)]
pub enum RsaKey {
    /// Private key, signs and verifies
    Private(RsaPrivateKey),
    /// Public key, verifies only
    Public(RsaPublicKey),
}

impl RsaKey {
    /// Private half, if present.
    #[must_use]
    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        match self {
            RsaKey::Private(key) => Some(key),
            RsaKey::Public(_) => None,
        }
    }

    /// Public half.
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        match self {
            RsaKey::Private(key) => key.to_public_key(),
            RsaKey::Public(key) => key.clone(),
        }
    }
}

impl From<RsaPrivateKey> for RsaKey {
    fn from(key: RsaPrivateKey) -> Self {
        RsaKey::Private(key)
    }
}

impl From<RsaPublicKey> for RsaKey {
    fn from(key: RsaPublicKey) -> Self {
        RsaKey::Public(key)
    }
}

/// Elliptic curve key handle on P-256, P-384 or P-521.
#[derive(Clone)]
pub enum EcKey {
    /// P-256 private key
    P256Private(p256::ecdsa::SigningKey),
    /// P-256 public key
    P256Public(p256::ecdsa::VerifyingKey),
    /// P-384 private key
    P384Private(p384::ecdsa::SigningKey),
    /// P-384 public key
    P384Public(p384::ecdsa::VerifyingKey),
    /// P-521 private key
    P521Private(p521::ecdsa::SigningKey),
    /// P-521 public key
    P521Public(p521::ecdsa::VerifyingKey),
}

impl EcKey {
    /// Whether the key can sign.
    #[must_use]
    pub fn is_private(&self) -> bool {
        matches!(
            self,
            EcKey::P256Private(_) | EcKey::P384Private(_) | EcKey::P521Private(_)
        )
    }

    /// Curve name as used in JWK `crv`.
    #[must_use]
    pub fn curve(&self) -> &'static str {
        match self {
            EcKey::P256Private(_) | EcKey::P256Public(_) => "P-256",
            EcKey::P384Private(_) | EcKey::P384Public(_) => "P-384",
            EcKey::P521Private(_) | EcKey::P521Public(_) => "P-521",
        }
    }
}

impl fmt::Debug for EcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = if self.is_private() { "private" } else { "public" };
        write!(f, "EcKey({} {half})", self.curve())
    }
}

impl From<p256::ecdsa::SigningKey> for EcKey {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        EcKey::P256Private(key)
    }
}

impl From<p256::ecdsa::VerifyingKey> for EcKey {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        EcKey::P256Public(key)
    }
}

impl From<p384::ecdsa::SigningKey> for EcKey {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        EcKey::P384Private(key)
    }
}

impl From<p384::ecdsa::VerifyingKey> for EcKey {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        EcKey::P384Public(key)
    }
}

impl From<p521::ecdsa::SigningKey> for EcKey {
    fn from(key: p521::ecdsa::SigningKey) -> Self {
        EcKey::P521Private(key)
    }
}

impl From<p521::ecdsa::VerifyingKey> for EcKey {
    fn from(key: p521::ecdsa::VerifyingKey) -> Self {
        EcKey::P521Public(key)
    }
}

/// The single key a [`crate::Signer`] is bound to.
#[derive(Clone, Debug)]
pub enum SignerKey {
    /// Shared secret for HS* algorithms
    Hmac(HmacSecret),
    /// RSA key for RS* algorithms
    Rsa(RsaKey),
    /// EC key for ES* algorithms
    Ec(EcKey),
}

impl SignerKey {
    /// Key family of this key.
    #[must_use]
    pub fn family(&self) -> KeyFamily {
        match self {
            SignerKey::Hmac(_) => KeyFamily::Hmac,
            SignerKey::Rsa(_) => KeyFamily::Rsa,
            SignerKey::Ec(_) => KeyFamily::Ec,
        }
    }

    /// Algorithm a freshly constructed signer allows for this key.
    #[must_use]
    pub fn default_algorithm(&self) -> Algorithm {
        match self {
            SignerKey::Hmac(_) => Algorithm::HS256,
            SignerKey::Rsa(_) => Algorithm::RS256,
            SignerKey::Ec(EcKey::P256Private(_) | EcKey::P256Public(_)) => Algorithm::ES256,
            SignerKey::Ec(EcKey::P384Private(_) | EcKey::P384Public(_)) => Algorithm::ES384,
            SignerKey::Ec(EcKey::P521Private(_) | EcKey::P521Public(_)) => Algorithm::ES512,
        }
    }
}

impl From<HmacSecret> for SignerKey {
    fn from(secret: HmacSecret) -> Self {
        SignerKey::Hmac(secret)
    }
}

impl From<RsaKey> for SignerKey {
    fn from(key: RsaKey) -> Self {
        SignerKey::Rsa(key)
    }
}

impl From<EcKey> for SignerKey {
    fn from(key: EcKey) -> Self {
        SignerKey::Ec(key)
    }
}

impl From<RsaPrivateKey> for SignerKey {
    fn from(key: RsaPrivateKey) -> Self {
        SignerKey::Rsa(key.into())
    }
}

impl From<RsaPublicKey> for SignerKey {
    fn from(key: RsaPublicKey) -> Self {
        SignerKey::Rsa(key.into())
    }
}

impl From<p256::ecdsa::SigningKey> for SignerKey {
    fn from(key: p256::ecdsa::SigningKey) -> Self {
        SignerKey::Ec(key.into())
    }
}

impl From<p256::ecdsa::VerifyingKey> for SignerKey {
    fn from(key: p256::ecdsa::VerifyingKey) -> Self {
        SignerKey::Ec(key.into())
    }
}

impl From<p384::ecdsa::SigningKey> for SignerKey {
    fn from(key: p384::ecdsa::SigningKey) -> Self {
        SignerKey::Ec(key.into())
    }
}

impl From<p384::ecdsa::VerifyingKey> for SignerKey {
    fn from(key: p384::ecdsa::VerifyingKey) -> Self {
        SignerKey::Ec(key.into())
    }
}

impl From<p521::ecdsa::SigningKey> for SignerKey {
    fn from(key: p521::ecdsa::SigningKey) -> Self {
        SignerKey::Ec(key.into())
    }
}

impl From<p521::ecdsa::VerifyingKey> for SignerKey {
    fn from(key: p521::ecdsa::VerifyingKey) -> Self {
        SignerKey::Ec(key.into())
    }
}
