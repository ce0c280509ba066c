//! Asymmetric key types and their DER codecs
//!
//! Converts between the binary encodings found in key files (PKCS#1, PKCS#8,
//! SEC1, SubjectPublicKeyInfo, X.509 certificates) and the in-memory key
//! types used for signing and verification.

use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use der::{Decode, Encode};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use pkcs8::{DecodePrivateKey, PrivateKeyInfo};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use spki::{DecodePublicKey, ObjectIdentifier, SubjectPublicKeyInfoRef};
use x509_cert::Certificate;

use crate::error::{KeyError, Result};

/// NIST curves usable for ECDSA signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    /// secp256r1, used by ES256
    P256,
    /// secp384r1, used by ES384
    P384,
    /// secp521r1, used by ES512
    P521,
}

impl Curve {
    /// JWK `crv` name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    /// Size in bytes of a coordinate or private scalar
    #[must_use]
    pub fn field_size(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// Parse a JWK `crv` name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "P-256" => Ok(Curve::P256),
            "P-384" => Ok(Curve::P384),
            "P-521" => Ok(Curve::P521),
            other => Err(KeyError::UnsupportedCurve(other.to_string())),
        }
    }

    fn from_oid(oid: ObjectIdentifier) -> Result<Self> {
        if oid == SECP_256_R_1 {
            Ok(Curve::P256)
        } else if oid == SECP_384_R_1 {
            Ok(Curve::P384)
        } else if oid == SECP_521_R_1 {
            Ok(Curve::P521)
        } else {
            Err(KeyError::UnsupportedCurve(oid.to_string()))
        }
    }
}

/// Asymmetric private key
#[derive(Debug, Clone)]
pub enum PrivateKey {
    /// RSA private key (with CRT primes)
    Rsa(Box<RsaPrivateKey>),
    /// P-256 private scalar
    P256(p256::SecretKey),
    /// P-384 private scalar
    P384(p384::SecretKey),
    /// P-521 private scalar
    P521(p521::SecretKey),
}

/// Asymmetric public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    /// RSA modulus and exponent
    Rsa(RsaPublicKey),
    /// P-256 point
    P256(p256::PublicKey),
    /// P-384 point
    P384(p384::PublicKey),
    /// P-521 point
    P521(p521::PublicKey),
}

impl PrivateKey {
    /// JWK `kty` of this key
    #[must_use]
    pub fn key_type(&self) -> &'static str {
        match self {
            PrivateKey::Rsa(_) => "RSA",
            _ => "EC",
        }
    }

    /// Curve for EC keys, `None` for RSA
    #[must_use]
    pub fn curve(&self) -> Option<Curve> {
        match self {
            PrivateKey::Rsa(_) => None,
            PrivateKey::P256(_) => Some(Curve::P256),
            PrivateKey::P384(_) => Some(Curve::P384),
            PrivateKey::P521(_) => Some(Curve::P521),
        }
    }

    /// Derive the matching public key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
            PrivateKey::P256(key) => PublicKey::P256(key.public_key()),
            PrivateKey::P384(key) => PublicKey::P384(key.public_key()),
            PrivateKey::P521(key) => PublicKey::P521(key.public_key()),
        }
    }

    /// Decode a PKCS#1 `RSAPrivateKey`
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let key = RsaPrivateKey::from_pkcs1_der(der)?;
        Ok(PrivateKey::Rsa(Box::new(key)))
    }

    /// Decode a PKCS#8 `PrivateKeyInfo`, dispatching on its algorithm OID
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)?;
        let oid = info.algorithm.oid;

        if oid == RSA_ENCRYPTION {
            let key = RsaPrivateKey::from_pkcs8_der(der)?;
            return Ok(PrivateKey::Rsa(Box::new(key)));
        }
        if oid != ID_EC_PUBLIC_KEY {
            return Err(KeyError::UnsupportedAlgorithm(oid.to_string()));
        }

        match Curve::from_oid(info.algorithm.parameters_oid()?)? {
            Curve::P256 => Ok(PrivateKey::P256(p256::SecretKey::from_pkcs8_der(der)?)),
            Curve::P384 => Ok(PrivateKey::P384(p384::SecretKey::from_pkcs8_der(der)?)),
            Curve::P521 => Ok(PrivateKey::P521(p521::SecretKey::from_pkcs8_der(der)?)),
        }
    }

    /// Decode a SEC1 `ECPrivateKey`
    ///
    /// The curves are tried in turn; their scalar sizes differ, so at most
    /// one of them accepts a given key.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self> {
        if let Ok(key) = p256::SecretKey::from_sec1_der(der) {
            return Ok(PrivateKey::P256(key));
        }
        if let Ok(key) = p384::SecretKey::from_sec1_der(der) {
            return Ok(PrivateKey::P384(key));
        }
        Ok(PrivateKey::P521(p521::SecretKey::from_sec1_der(der)?))
    }
}

impl PublicKey {
    /// JWK `kty` of this key
    #[must_use]
    pub fn key_type(&self) -> &'static str {
        match self {
            PublicKey::Rsa(_) => "RSA",
            _ => "EC",
        }
    }

    /// Curve for EC keys, `None` for RSA
    #[must_use]
    pub fn curve(&self) -> Option<Curve> {
        match self {
            PublicKey::Rsa(_) => None,
            PublicKey::P256(_) => Some(Curve::P256),
            PublicKey::P384(_) => Some(Curve::P384),
            PublicKey::P521(_) => Some(Curve::P521),
        }
    }

    /// Decode an X.509 SubjectPublicKeyInfo, dispatching on its algorithm OID
    pub fn from_spki_der(der: &[u8]) -> Result<Self> {
        let info = SubjectPublicKeyInfoRef::try_from(der)?;
        let oid = info.algorithm.oid;

        if oid == RSA_ENCRYPTION {
            return Ok(PublicKey::Rsa(RsaPublicKey::from_public_key_der(der)?));
        }
        if oid != ID_EC_PUBLIC_KEY {
            return Err(KeyError::UnsupportedAlgorithm(oid.to_string()));
        }

        match Curve::from_oid(info.algorithm.parameters_oid()?)? {
            Curve::P256 => Ok(PublicKey::P256(p256::PublicKey::from_public_key_der(der)?)),
            Curve::P384 => Ok(PublicKey::P384(p384::PublicKey::from_public_key_der(der)?)),
            Curve::P521 => Ok(PublicKey::P521(p521::PublicKey::from_public_key_der(der)?)),
        }
    }

    /// Decode an X.509 certificate and return its subject public key
    pub fn from_certificate_der(der: &[u8]) -> Result<Self> {
        let cert = Certificate::from_der(der)?;
        let spki = cert.tbs_certificate.subject_public_key_info.to_der()?;
        Self::from_spki_der(&spki)
    }

    /// Build an EC public key from big-endian affine coordinates
    pub fn from_ec_coordinates(curve: Curve, x: &[u8], y: &[u8]) -> Result<Self> {
        let size = curve.field_size();
        if x.len() != size {
            return Err(KeyError::invalid_parameter(
                "x",
                format!("expected {size} bytes for {}, got {}", curve.name(), x.len()),
            ));
        }
        if y.len() != size {
            return Err(KeyError::invalid_parameter(
                "y",
                format!("expected {size} bytes for {}, got {}", curve.name(), y.len()),
            ));
        }

        let mut sec1 = Vec::with_capacity(1 + 2 * size);
        sec1.push(0x04);
        sec1.extend_from_slice(x);
        sec1.extend_from_slice(y);

        Ok(match curve {
            Curve::P256 => PublicKey::P256(p256::PublicKey::from_sec1_bytes(&sec1)?),
            Curve::P384 => PublicKey::P384(p384::PublicKey::from_sec1_bytes(&sec1)?),
            Curve::P521 => PublicKey::P521(p521::PublicKey::from_sec1_bytes(&sec1)?),
        })
    }

    /// Big-endian affine `(x, y)` for EC keys, `None` for RSA
    #[must_use]
    pub fn ec_coordinates(&self) -> Option<(Vec<u8>, Vec<u8>)> {
        let (curve, point) = match self {
            PublicKey::Rsa(_) => return None,
            PublicKey::P256(key) => (Curve::P256, key.to_encoded_point(false).as_bytes().to_vec()),
            PublicKey::P384(key) => (Curve::P384, key.to_encoded_point(false).as_bytes().to_vec()),
            PublicKey::P521(key) => (Curve::P521, key.to_encoded_point(false).as_bytes().to_vec()),
        };
        // Uncompressed SEC1: 0x04 || x || y
        let size = curve.field_size();
        if point.len() != 1 + 2 * size {
            return None;
        }
        Some((point[1..=size].to_vec(), point[1 + size..].to_vec()))
    }

    /// Uncompressed SEC1 point for EC keys, `None` for RSA
    #[must_use]
    pub fn to_sec1_bytes(&self) -> Option<Vec<u8>> {
        match self {
            PublicKey::Rsa(_) => None,
            PublicKey::P256(key) => Some(key.to_encoded_point(false).as_bytes().to_vec()),
            PublicKey::P384(key) => Some(key.to_encoded_point(false).as_bytes().to_vec()),
            PublicKey::P521(key) => Some(key.to_encoded_point(false).as_bytes().to_vec()),
        }
    }
}
