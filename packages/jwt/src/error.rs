//! JWT error taxonomy
//!
//! Every failure is raised where it is detected and handed to the caller
//! unchanged. Callers of [`crate::Signer::verify`] must treat any error as
//! "reject this token"; there is no partially trusted outcome.

use crate::algorithm::Algorithm;
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// JWT error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// Malformed compact token: wrong segment count, invalid base64url, or a
    /// segment that is not a JSON object.
    #[error("Invalid JWT: {reason}: {input}")]
    Parse {
        /// What was wrong with the input
        reason: String,
        /// The offending input
        input: String,
    },

    /// The `alg` header is not a known algorithm identifier.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The algorithm is known but not on the verifier's allow-list.
    #[error("Algorithm not allowed: {0}")]
    UnallowedAlgorithm(Algorithm),

    /// The signing primitive failed or the key cannot sign with the algorithm.
    #[error("Signature generation failed: {0}")]
    SignatureGeneration(String),

    /// The signature does not match, cannot be decoded, or cannot be checked
    /// with the configured key.
    #[error("Signature verification failed: {0}")]
    SignatureVerification(String),

    /// A claim exists but does not have the requested type.
    #[error("Claim {claim} is not {expected}")]
    ClaimType {
        /// Claim name
        claim: String,
        /// Expected type description
        expected: String,
    },

    /// Signer configuration could not be decoded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JwtError {
    /// Create a parse error reporting the offending input
    #[inline]
    #[must_use]
    pub fn parse(reason: &str, input: &str) -> Self {
        JwtError::Parse {
            reason: reason.to_string(),
            input: input.to_string(),
        }
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a signature generation error
    #[inline]
    #[must_use]
    pub fn signature_generation(msg: &str) -> Self {
        JwtError::SignatureGeneration(msg.to_string())
    }

    /// Create a signature verification error
    #[inline]
    #[must_use]
    pub fn signature_verification(msg: &str) -> Self {
        JwtError::SignatureVerification(msg.to_string())
    }

    /// Create a claim type mismatch error
    #[inline]
    #[must_use]
    pub fn claim_type(claim: &str, expected: &str) -> Self {
        JwtError::ClaimType {
            claim: claim.to_string(),
            expected: expected.to_string(),
        }
    }
}
