//! Keys accepted by the sign and verify operations

use jose_jwk::{PrivateKey, PublicKey};
use zeroize::Zeroizing;

use crate::algorithms::{Algorithm, KeyFamily};
use crate::error::{JwtError, JwtResult};

/// Key used to produce a signature
#[derive(Debug, Clone)]
pub enum SigningKey {
    /// Shared HMAC secret
    Hmac(Zeroizing<Vec<u8>>),
    /// RSA or EC private key
    Private(PrivateKey),
}

/// Key used to check a signature
#[derive(Debug, Clone)]
pub enum VerifyingKey {
    /// Shared HMAC secret
    Hmac(Zeroizing<Vec<u8>>),
    /// RSA or EC public key
    Public(PublicKey),
}

pub(crate) fn private_family(key: &PrivateKey) -> KeyFamily {
    key.curve().map_or(KeyFamily::Rsa, KeyFamily::Ec)
}

fn public_family(key: &PublicKey) -> KeyFamily {
    key.curve().map_or(KeyFamily::Rsa, KeyFamily::Ec)
}

fn ensure_family(alg: Algorithm, actual: KeyFamily) -> JwtResult<()> {
    if alg.family() == actual {
        Ok(())
    } else {
        Err(JwtError::key_mismatch(alg, actual))
    }
}

impl SigningKey {
    /// HMAC secret from raw bytes
    #[must_use]
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        SigningKey::Hmac(Zeroizing::new(secret.into()))
    }

    /// Key kind, for algorithm compatibility checks
    #[must_use]
    pub fn family(&self) -> KeyFamily {
        match self {
            SigningKey::Hmac(_) => KeyFamily::Hmac,
            SigningKey::Private(key) => private_family(key),
        }
    }

    /// Fail unless this key can sign with `alg`
    pub fn check_algorithm(&self, alg: Algorithm) -> JwtResult<()> {
        ensure_family(alg, self.family())
    }
}

impl VerifyingKey {
    /// HMAC secret from raw bytes
    #[must_use]
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        VerifyingKey::Hmac(Zeroizing::new(secret.into()))
    }

    /// Key kind, for algorithm compatibility checks
    #[must_use]
    pub fn family(&self) -> KeyFamily {
        match self {
            VerifyingKey::Hmac(_) => KeyFamily::Hmac,
            VerifyingKey::Public(key) => public_family(key),
        }
    }

    /// Fail unless this key can verify `alg` signatures
    pub fn check_algorithm(&self, alg: Algorithm) -> JwtResult<()> {
        ensure_family(alg, self.family())
    }
}

impl From<PrivateKey> for SigningKey {
    fn from(key: PrivateKey) -> Self {
        SigningKey::Private(key)
    }
}

impl From<PublicKey> for VerifyingKey {
    fn from(key: PublicKey) -> Self {
        VerifyingKey::Public(key)
    }
}
