//! Compact JSON Web Tokens with an allow-list enforcing signer
//!
//! This crate provides:
//! - [`Token`], an unverified header/payload/signature model with registered
//!   claim accessors
//! - [`Signer`], bound to one HMAC, RSA or EC key, producing and checking
//!   HS256/384/512, RS256/384/512 and ES256/384/512 signatures
//! - an explicit algorithm allow-list, checked before any cryptography
//!
//! ```
//! use compact_token::{Algorithm, Signer, Token};
//!
//! let mut signer = Signer::hmac("0123456789ABCDEF0123456789ABCDEF");
//! signer.add_algorithm(Algorithm::HS512);
//!
//! let mut token = Token::new();
//! token.set_token_type("JWT").set_subject("1234567890");
//! let jwt = signer.sign(&mut token, Algorithm::HS512)?;
//!
//! let verified = signer.verify(&jwt)?;
//! assert_eq!(verified.subject(), "1234567890");
//! # Ok::<(), compact_token::JwtError>(())
//! ```

mod algorithm;
mod config;
pub(crate) mod crypto;
mod error;
pub mod keys;
pub mod serializer;
mod signer;
pub mod token;

pub use algorithm::{Algorithm, DigestStrength, KeyFamily};
pub use config::SignerConfig;
pub use error::{JwtError, JwtResult};
pub use keys::{EcKey, HmacSecret, RsaKey, SignerKey};
pub use serializer::{deserialize, serialize, split};
pub use signer::Signer;
pub use token::Token;
