//! RSASSA-PKCS1-v1_5 signatures (RS256, RS384, RS512)

use crate::algorithm::DigestStrength;
use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

/// Sign the signing input with the private key.
pub(crate) fn sign(
    strength: DigestStrength,
    private_key: &RsaPrivateKey,
    input: &[u8],
) -> JwtResult<Vec<u8>> {
    let signature = match strength {
        DigestStrength::Sha256 => SigningKey::<Sha256>::new(private_key.clone()).try_sign(input),
        DigestStrength::Sha384 => SigningKey::<Sha384>::new(private_key.clone()).try_sign(input),
        DigestStrength::Sha512 => SigningKey::<Sha512>::new(private_key.clone()).try_sign(input),
    }
    .map_err(|e| JwtError::SignatureGeneration(format!("RSA signing failed: {e}")))?;

    Ok(signature.to_vec())
}

/// Verify a PKCS#1 v1.5 signature. A malformed signature is a mismatch.
pub(crate) fn verify(
    strength: DigestStrength,
    public_key: &RsaPublicKey,
    input: &[u8],
    signature: &[u8],
) -> JwtResult<bool> {
    let Ok(signature) = Signature::try_from(signature) else {
        return Ok(false);
    };

    let result = match strength {
        DigestStrength::Sha256 => {
            VerifyingKey::<Sha256>::new(public_key.clone()).verify(input, &signature)
        }
        DigestStrength::Sha384 => {
            VerifyingKey::<Sha384>::new(public_key.clone()).verify(input, &signature)
        }
        DigestStrength::Sha512 => {
            VerifyingKey::<Sha512>::new(public_key.clone()).verify(input, &signature)
        }
    };

    Ok(result.is_ok())
}
