//! ECDSA signatures (ES256, ES384, ES512)
//!
//! Signatures use the fixed-width JOSE encoding `R || S`. The digest is chosen
//! by the algorithm, not by the curve: a P-256 key signing ES512 hashes with
//! SHA-512 and the digest is truncated to the curve order, as OpenSSL does.
//! On P-521 every digest is shorter than the field and is read as a
//! left-padded integer.

use crate::algorithm::DigestStrength;
use crate::error::{JwtError, JwtResult};
use crate::keys::EcKey;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use sha2::{Digest, Sha256, Sha384, Sha512};

fn prehash(strength: DigestStrength, input: &[u8]) -> Vec<u8> {
    match strength {
        DigestStrength::Sha256 => Sha256::digest(input).to_vec(),
        DigestStrength::Sha384 => Sha384::digest(input).to_vec(),
        DigestStrength::Sha512 => Sha512::digest(input).to_vec(),
    }
}

// P-521 field elements are 66 bytes.
const P521_FIELD_LEN: usize = 66;

fn left_pad(digest: &[u8], len: usize) -> Vec<u8> {
    let mut padded = vec![0u8; len.saturating_sub(digest.len())];
    padded.extend_from_slice(digest);
    padded
}

/// Sign the signing input. Public keys cannot sign.
pub(crate) fn sign(strength: DigestStrength, key: &EcKey, input: &[u8]) -> JwtResult<Vec<u8>> {
    let digest = prehash(strength, input);

    match key {
        EcKey::P256Private(signing_key) => {
            let signature: p256::ecdsa::Signature = signing_key
                .sign_prehash(&digest)
                .map_err(|e| JwtError::SignatureGeneration(format!("ECDSA signing failed: {e}")))?;
            Ok(signature.to_bytes().to_vec())
        }
        EcKey::P384Private(signing_key) => {
            let signature: p384::ecdsa::Signature = signing_key
                .sign_prehash(&digest)
                .map_err(|e| JwtError::SignatureGeneration(format!("ECDSA signing failed: {e}")))?;
            Ok(signature.to_bytes().to_vec())
        }
        EcKey::P521Private(signing_key) => {
            let signature: p521::ecdsa::Signature = signing_key
                .sign_prehash(&left_pad(&digest, P521_FIELD_LEN))
                .map_err(|e| JwtError::SignatureGeneration(format!("ECDSA signing failed: {e}")))?;
            Ok(signature.to_bytes().to_vec())
        }
        EcKey::P256Public(_) | EcKey::P384Public(_) | EcKey::P521Public(_) => Err(
            JwtError::signature_generation("No EC private key available"),
        ),
    }
}

/// Verify an `R || S` signature. A malformed signature is a mismatch.
pub(crate) fn verify(
    strength: DigestStrength,
    key: &EcKey,
    input: &[u8],
    signature: &[u8],
) -> JwtResult<bool> {
    let digest = prehash(strength, input);

    let valid = match key {
        EcKey::P256Private(signing_key) => {
            verify_p256(signing_key.verifying_key(), &digest, signature)
        }
        EcKey::P256Public(verifying_key) => verify_p256(verifying_key, &digest, signature),
        EcKey::P384Private(signing_key) => {
            verify_p384(signing_key.verifying_key(), &digest, signature)
        }
        EcKey::P384Public(verifying_key) => verify_p384(verifying_key, &digest, signature),
        EcKey::P521Private(signing_key) => verify_p521(
            &p521::ecdsa::VerifyingKey::from(signing_key),
            &digest,
            signature,
        ),
        EcKey::P521Public(verifying_key) => verify_p521(verifying_key, &digest, signature),
    };

    Ok(valid)
}

fn verify_p256(key: &p256::ecdsa::VerifyingKey, digest: &[u8], signature: &[u8]) -> bool {
    p256::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify_prehash(digest, &signature).is_ok())
}

fn verify_p384(key: &p384::ecdsa::VerifyingKey, digest: &[u8], signature: &[u8]) -> bool {
    p384::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify_prehash(digest, &signature).is_ok())
}

fn verify_p521(key: &p521::ecdsa::VerifyingKey, digest: &[u8], signature: &[u8]) -> bool {
    let digest = left_pad(digest, P521_FIELD_LEN);
    p521::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify_prehash(&digest, &signature).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p256_key() -> EcKey {
        let secret = [0x42u8; 32];
        let signing_key =
            p256::ecdsa::SigningKey::from_slice(&secret).expect("valid P-256 scalar");
        EcKey::P256Private(signing_key)
    }

    #[test]
    fn signature_width_follows_curve() {
        let key = p256_key();
        for strength in [DigestStrength::Sha256, DigestStrength::Sha384, DigestStrength::Sha512] {
            let signature = sign(strength, &key, b"header.payload").expect("sign");
            assert_eq!(signature.len(), 64);
            assert!(verify(strength, &key, b"header.payload", &signature).expect("verify"));
        }
    }

    fn p521_key() -> EcKey {
        let mut scalar = [0x5au8; P521_FIELD_LEN];
        scalar[0] = 0x01;
        let signing_key =
            p521::ecdsa::SigningKey::from_slice(&scalar).expect("valid P-521 scalar");
        EcKey::P521Private(signing_key)
    }

    #[test]
    fn p521_signs_every_digest_strength() {
        let key = p521_key();
        for strength in [DigestStrength::Sha256, DigestStrength::Sha384, DigestStrength::Sha512] {
            let signature = sign(strength, &key, b"header.payload").expect("sign");
            assert_eq!(signature.len(), 2 * P521_FIELD_LEN);
            assert!(verify(strength, &key, b"header.payload", &signature).expect("verify"));
            assert!(!verify(strength, &key, b"header.payloaD", &signature).expect("verify"));
        }
    }

    #[test]
    fn p521_public_key_verifies_but_cannot_sign() {
        let key = p521_key();
        let EcKey::P521Private(signing_key) = &key else {
            unreachable!()
        };
        let public = EcKey::P521Public(p521::ecdsa::VerifyingKey::from(signing_key));

        let signature = sign(DigestStrength::Sha512, &key, b"input").expect("sign");
        assert!(verify(DigestStrength::Sha512, &public, b"input", &signature).expect("verify"));
        assert!(matches!(
            sign(DigestStrength::Sha512, &public, b"input"),
            Err(JwtError::SignatureGeneration(_))
        ));
    }

    #[test]
    fn left_pad_keeps_integer_value() {
        assert_eq!(left_pad(&[1, 2], 4), vec![0, 0, 1, 2]);
        assert_eq!(left_pad(&[1, 2, 3], 2), vec![1, 2, 3]);
    }

    #[test]
    fn digest_strength_is_bound_into_signature() {
        let key = p256_key();
        let signature = sign(DigestStrength::Sha256, &key, b"input").expect("sign");
        assert!(!verify(DigestStrength::Sha384, &key, b"input", &signature).expect("verify"));
    }

    #[test]
    fn malformed_signature_is_a_mismatch() {
        let key = p256_key();
        assert!(!verify(DigestStrength::Sha256, &key, b"input", &[0u8; 10]).expect("verify"));
        assert!(!verify(DigestStrength::Sha256, &key, b"input", &[0u8; 64]).expect("verify"));
    }

    #[test]
    fn public_key_cannot_sign() {
        let key = p256_key();
        let EcKey::P256Private(signing_key) = &key else {
            unreachable!()
        };
        let public = EcKey::P256Public(signing_key.verifying_key().clone());
        assert!(matches!(
            sign(DigestStrength::Sha256, &public, b"input"),
            Err(JwtError::SignatureGeneration(_))
        ));
    }
}
