//! Key pair generation for JWS signing algorithms

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand_core::OsRng;
use rsa::RsaPrivateKey;

use crate::error::{KeyError, Result};
use crate::keys::{Curve, PrivateKey};

/// RSA modulus size used when none is requested
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Asymmetric JWS algorithms a key pair can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,
    /// RSASSA-PSS with SHA-256
    PS256,
    /// RSASSA-PSS with SHA-384
    PS384,
    /// RSASSA-PSS with SHA-512
    PS512,
    /// ECDSA on P-256 with SHA-256
    ES256,
    /// ECDSA on P-384 with SHA-384
    ES384,
    /// ECDSA on P-521 with SHA-512
    ES512,
}

impl KeyAlgorithm {
    /// JOSE `alg` name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            KeyAlgorithm::RS256 => "RS256",
            KeyAlgorithm::RS384 => "RS384",
            KeyAlgorithm::RS512 => "RS512",
            KeyAlgorithm::PS256 => "PS256",
            KeyAlgorithm::PS384 => "PS384",
            KeyAlgorithm::PS512 => "PS512",
            KeyAlgorithm::ES256 => "ES256",
            KeyAlgorithm::ES384 => "ES384",
            KeyAlgorithm::ES512 => "ES512",
        }
    }

    /// Curve for ES algorithms
    #[must_use]
    pub fn curve(self) -> Option<Curve> {
        match self {
            KeyAlgorithm::ES256 => Some(Curve::P256),
            KeyAlgorithm::ES384 => Some(Curve::P384),
            KeyAlgorithm::ES512 => Some(Curve::P521),
            _ => None,
        }
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "RS256" => Ok(KeyAlgorithm::RS256),
            "RS384" => Ok(KeyAlgorithm::RS384),
            "RS512" => Ok(KeyAlgorithm::RS512),
            "PS256" => Ok(KeyAlgorithm::PS256),
            "PS384" => Ok(KeyAlgorithm::PS384),
            "PS512" => Ok(KeyAlgorithm::PS512),
            "ES256" => Ok(KeyAlgorithm::ES256),
            "ES384" => Ok(KeyAlgorithm::ES384),
            "ES512" => Ok(KeyAlgorithm::ES512),
            "HS256" | "HS384" | "HS512" => Err(KeyError::UnsupportedAlgorithm(format!(
                "{s} is symmetric and has no key pair"
            ))),
            _ => Err(KeyError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Generate a fresh private key for `alg`
///
/// `rsa_bits` is only used for RS/PS algorithms.
pub fn generate_private_key(alg: KeyAlgorithm, rsa_bits: usize) -> Result<PrivateKey> {
    let mut rng = OsRng;
    let key = match alg.curve() {
        None => {
            debug!("generating {rsa_bits}-bit RSA key for {alg}");
            PrivateKey::Rsa(Box::new(RsaPrivateKey::new(&mut rng, rsa_bits)?))
        }
        Some(Curve::P256) => PrivateKey::P256(p256::SecretKey::random(&mut rng)),
        Some(Curve::P384) => PrivateKey::P384(p384::SecretKey::random(&mut rng)),
        Some(Curve::P521) => PrivateKey::P521(p521::SecretKey::random(&mut rng)),
    };
    Ok(key)
}
