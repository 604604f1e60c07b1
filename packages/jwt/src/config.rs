//! Signer configuration

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Knobs applied when building a [`crate::Signer`].
///
/// ```json
/// { "algorithms": ["HS256", "HS512"], "enforce_hmac_key_length": true }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignerConfig {
    /// Algorithms allowed in addition to the key's default one
    pub algorithms: BTreeSet<Algorithm>,
    /// Reject HMAC secrets shorter than the digest output instead of warning
    pub enforce_hmac_key_length: bool,
}

impl SignerConfig {
    /// Decode a configuration from JSON.
    ///
    /// # Errors
    /// Returns `JwtError::Config` on malformed JSON, unknown fields or
    /// unknown algorithm identifiers.
    pub fn from_json(json: &str) -> JwtResult<Self> {
        serde_json::from_str(json).map_err(|e| JwtError::Config(e.to_string()))
    }

    /// Add an algorithm to the configured set.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithms.insert(algorithm);
        self
    }

    /// Turn HMAC key length enforcement on or off.
    #[must_use]
    pub fn with_enforced_hmac_key_length(mut self, enforce: bool) -> Self {
        self.enforce_hmac_key_length = enforce;
        self
    }
}
