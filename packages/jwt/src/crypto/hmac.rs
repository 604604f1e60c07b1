//! HMAC-SHA2 signatures (HS256, HS384, HS512)

use crate::algorithm::DigestStrength;
use crate::error::{JwtError, JwtResult};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

fn compute<M: Mac + KeyInit>(secret: &[u8], input: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| JwtError::signature_generation("Invalid HMAC key"))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// MAC over the signing input.
pub(crate) fn sign(strength: DigestStrength, secret: &[u8], input: &[u8]) -> JwtResult<Vec<u8>> {
    match strength {
        DigestStrength::Sha256 => compute::<HmacSha256>(secret, input),
        DigestStrength::Sha384 => compute::<HmacSha384>(secret, input),
        DigestStrength::Sha512 => compute::<HmacSha512>(secret, input),
    }
}

/// Recompute and compare in constant time.
pub(crate) fn verify(
    strength: DigestStrength,
    secret: &[u8],
    input: &[u8],
    signature: &[u8],
) -> JwtResult<bool> {
    let expected = sign(strength, secret, input)
        .map_err(|_| JwtError::signature_verification("Invalid HMAC key"))?;
    Ok(expected.ct_eq(signature).into())
}
