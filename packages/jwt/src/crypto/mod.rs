//! Signature primitives behind the compact serialization

mod ecdsa;
mod hmac;
mod rsa;

use jose_jwk::{PrivateKey, PublicKey};

use crate::algorithms::Algorithm;
use crate::error::JwtResult;
use crate::keys::{SigningKey, VerifyingKey};

/// Sign `message`; the key must already match `alg`
pub(crate) fn sign(alg: Algorithm, key: &SigningKey, message: &[u8]) -> JwtResult<Vec<u8>> {
    match key {
        SigningKey::Hmac(secret) => self::hmac::sign(alg, secret, message),
        SigningKey::Private(PrivateKey::Rsa(key)) => self::rsa::sign(alg, key, message),
        SigningKey::Private(key) => self::ecdsa::sign(alg, key, message),
    }
}

/// Check `signature` over `message`; the key must already match `alg`
pub(crate) fn verify(
    alg: Algorithm,
    key: &VerifyingKey,
    message: &[u8],
    signature: &[u8],
) -> JwtResult<()> {
    match key {
        VerifyingKey::Hmac(secret) => self::hmac::verify(alg, secret, message, signature),
        VerifyingKey::Public(PublicKey::Rsa(key)) => {
            self::rsa::verify(alg, key, message, signature)
        }
        VerifyingKey::Public(key) => self::ecdsa::verify(alg, key, message, signature),
    }
}
