//! Signing and verification under an algorithm allow-list
//!
//! A [`Signer`] is bound to exactly one key. Verification walks a fixed
//! sequence and stops at the first failure:
//!
//! 1. parse the compact token,
//! 2. resolve the `alg` header to a known [`Algorithm`],
//! 3. check the algorithm against the allow-list, before any cryptography,
//! 4. check the signature over the original first two segments.
//!
//! Signing never consults the allow-list: a signer may produce tokens that it
//! would itself refuse to verify.

use crate::algorithm::{Algorithm, DigestStrength, KeyFamily};
use crate::config::SignerConfig;
use crate::crypto::{ecdsa, hmac, rsa};
use crate::error::{JwtError, JwtResult};
use crate::keys::{EcKey, HmacSecret, RsaKey, SignerKey};
use crate::serializer::{self, base64_url_decode, base64_url_encode};
use crate::token::Token;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Signs tokens and verifies compact JWTs with a single key.
///
/// A new signer allows only the key's default algorithm (HS256, RS256, ES256
/// for P-256, ES384 for P-384 or ES512 for P-521). Widening the allow-list
/// needs `&mut self`, so a signer shared across threads behind `Arc` is frozen.
#[derive(Clone, Debug)]
pub struct Signer {
    key: SignerKey,
    algorithms: BTreeSet<Algorithm>,
    enforce_hmac_key_length: bool,
}

impl Signer {
    /// Signer allowing only the key's default algorithm.
    pub fn new(key: impl Into<SignerKey>) -> Self {
        let key = key.into();
        let algorithms = BTreeSet::from([key.default_algorithm()]);
        Self {
            key,
            algorithms,
            enforce_hmac_key_length: false,
        }
    }

    /// HMAC signer.
    pub fn hmac(secret: impl Into<HmacSecret>) -> Self {
        Self::new(SignerKey::Hmac(secret.into()))
    }

    /// RSA signer. A public key can only verify.
    pub fn rsa(key: impl Into<RsaKey>) -> Self {
        Self::new(SignerKey::Rsa(key.into()))
    }

    /// ECDSA signer. A public key can only verify.
    pub fn ec(key: impl Into<EcKey>) -> Self {
        Self::new(SignerKey::Ec(key.into()))
    }

    /// Signer with the configured algorithms added to the key's default.
    pub fn from_config(key: impl Into<SignerKey>, config: &SignerConfig) -> Self {
        let mut signer = Self::new(key);
        signer.add_algorithms(config.algorithms.iter().copied());
        signer.enforce_hmac_key_length = config.enforce_hmac_key_length;
        signer
    }

    /// The bound key.
    #[must_use]
    pub fn key(&self) -> &SignerKey {
        &self.key
    }

    /// Allow an algorithm for verification. Adding twice is a no-op.
    pub fn add_algorithm(&mut self, algorithm: Algorithm) -> &mut Self {
        self.algorithms.insert(algorithm);
        self
    }

    /// Allow several algorithms.
    pub fn add_algorithms(&mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> &mut Self {
        self.algorithms.extend(algorithms);
        self
    }

    /// Allow every signing algorithm. Never adds [`Algorithm::None`].
    pub fn add_all_algorithms(&mut self) -> &mut Self {
        self.add_algorithms(Algorithm::ALL)
    }

    /// Whether tokens carrying `algorithm` pass the allow-list.
    #[must_use]
    pub fn is_allowed(&self, algorithm: Algorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }

    /// The allow-list.
    #[must_use]
    pub fn algorithms(&self) -> &BTreeSet<Algorithm> {
        &self.algorithms
    }

    /// Sign `token` with `algorithm` and return the compact form.
    ///
    /// Sets the `alg` header, signs the freshly serialized header and payload
    /// and stores the base64url signature in the token. [`Algorithm::None`]
    /// produces an empty signature segment.
    ///
    /// # Errors
    /// Returns `JwtError::SignatureGeneration` if the key family does not match
    /// the algorithm, the key cannot sign, or the primitive fails.
    pub fn sign(&self, token: &mut Token, algorithm: Algorithm) -> JwtResult<String> {
        token.set_algorithm(algorithm);

        let signing_input = format!(
            "{}.{}",
            serializer::serialize(token.header()),
            serializer::serialize(token.payload())
        );
        let signature = base64_url_encode(&self.sign_input(algorithm, signing_input.as_bytes())?);

        debug!(algorithm = %algorithm, "token signed");
        let compact = format!("{signing_input}.{signature}");
        token.set_signature(signature);
        Ok(compact)
    }

    /// Verify a compact JWT and return the decoded token.
    ///
    /// # Errors
    /// - `JwtError::Parse` if the token is malformed
    /// - `JwtError::UnsupportedAlgorithm` if `alg` is missing or unknown
    /// - `JwtError::UnallowedAlgorithm` if `alg` is not on the allow-list
    /// - `JwtError::SignatureVerification` if the signature does not check out
    pub fn verify(&self, jwt: &str) -> JwtResult<Token> {
        let token = Token::parse(jwt)?;
        let algorithm: Algorithm = token.algorithm().parse()?;

        if !self.is_allowed(algorithm) {
            warn!(algorithm = %algorithm, "token rejected: algorithm not allowed");
            return Err(JwtError::UnallowedAlgorithm(algorithm));
        }

        let Some((signing_input, _)) = jwt.rsplit_once('.') else {
            return Err(JwtError::parse("not enough segments", jwt));
        };

        let signature = base64_url_decode(token.signature())
            .map_err(|_| JwtError::signature_verification("signature is not base64url"))?;

        if !self.verify_input(algorithm, signing_input.as_bytes(), &signature)? {
            warn!(algorithm = %algorithm, "token rejected: signature mismatch");
            return Err(JwtError::signature_verification("signature mismatch"));
        }

        debug!(algorithm = %algorithm, "token verified");
        Ok(token)
    }

    fn sign_input(&self, algorithm: Algorithm, input: &[u8]) -> JwtResult<Vec<u8>> {
        let (Some(family), Some(strength)) = (algorithm.key_family(), algorithm.digest()) else {
            return Ok(Vec::new());
        };

        match (&self.key, family) {
            (SignerKey::Hmac(secret), KeyFamily::Hmac) => {
                self.check_hmac_secret(secret, algorithm, strength)
                    .map_err(JwtError::SignatureGeneration)?;
                hmac::sign(strength, secret.as_bytes(), input)
            }
            (SignerKey::Rsa(key), KeyFamily::Rsa) => {
                let private_key = key
                    .private_key()
                    .ok_or_else(|| JwtError::signature_generation("No RSA private key available"))?;
                rsa::sign(strength, private_key, input)
            }
            (SignerKey::Ec(key), KeyFamily::Ec) => ecdsa::sign(strength, key, input),
            (key, family) => Err(JwtError::SignatureGeneration(format!(
                "{algorithm} requires a {family} key, signer holds a {} key",
                key.family()
            ))),
        }
    }

    fn verify_input(
        &self,
        algorithm: Algorithm,
        input: &[u8],
        signature: &[u8],
    ) -> JwtResult<bool> {
        let (Some(family), Some(strength)) = (algorithm.key_family(), algorithm.digest()) else {
            if signature.is_empty() {
                return Ok(true);
            }
            return Err(JwtError::signature_verification(
                "unsecured token carries a signature",
            ));
        };

        match (&self.key, family) {
            (SignerKey::Hmac(secret), KeyFamily::Hmac) => {
                self.check_hmac_secret(secret, algorithm, strength)
                    .map_err(JwtError::SignatureVerification)?;
                hmac::verify(strength, secret.as_bytes(), input, signature)
            }
            (SignerKey::Rsa(key), KeyFamily::Rsa) => {
                rsa::verify(strength, &key.public_key(), input, signature)
            }
            (SignerKey::Ec(key), KeyFamily::Ec) => ecdsa::verify(strength, key, input, signature),
            (key, family) => Err(JwtError::SignatureVerification(format!(
                "{algorithm} requires a {family} key, signer holds a {} key",
                key.family()
            ))),
        }
    }

    fn check_hmac_secret(
        &self,
        secret: &HmacSecret,
        algorithm: Algorithm,
        strength: DigestStrength,
    ) -> Result<(), String> {
        if secret.is_empty() {
            return Err("No HMAC key available".to_string());
        }

        let min_len = strength.output_len();
        if secret.len() < min_len {
            if self.enforce_hmac_key_length {
                return Err(format!(
                    "HMAC key for {algorithm} must be at least {min_len} bytes, got {}",
                    secret.len()
                ));
            }
            warn!(
                algorithm = %algorithm,
                key_len = secret.len(),
                min_len,
                "HMAC secret shorter than digest output"
            );
        }

        Ok(())
    }
}
