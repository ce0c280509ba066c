//! JSON Web Key (RFC 7517) object model
//!
//! A [`Jwk`] is a `kty`-tagged set of key parameters plus the optional `use`,
//! `alg` and `kid` members. Binary members are base64url without padding;
//! integers are unsigned big-endian and EC values are padded to the curve's
//! field size.

use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::base64url;
use crate::error::{KeyError, Result};
use crate::keys::{Curve, PrivateKey, PublicKey};

/// A single JSON Web Key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type and type-specific members
    #[serde(flatten)]
    pub params: KeyParams,
    /// Intended use (`sig` or `enc`)
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    /// Algorithm the key is meant for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Key identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

/// Type-specific key members, tagged by `kty`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kty")]
pub enum KeyParams {
    /// `kty: "RSA"`
    #[serde(rename = "RSA")]
    Rsa(RsaParams),
    /// `kty: "EC"`
    #[serde(rename = "EC")]
    Ec(EcParams),
    /// `kty: "oct"`
    #[serde(rename = "oct")]
    Oct(OctParams),
}

/// RSA members (RFC 7518 §6.3)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaParams {
    /// Modulus
    #[serde(with = "base64url")]
    pub n: Vec<u8>,
    /// Public exponent
    #[serde(with = "base64url")]
    pub e: Vec<u8>,
    /// Private exponent
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub d: Option<Vec<u8>>,
    /// First prime factor
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub p: Option<Vec<u8>>,
    /// Second prime factor
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub q: Option<Vec<u8>>,
    /// First factor CRT exponent
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub dp: Option<Vec<u8>>,
    /// Second factor CRT exponent
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub dq: Option<Vec<u8>>,
    /// First CRT coefficient
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub qi: Option<Vec<u8>>,
}

/// Elliptic curve members (RFC 7518 §6.2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcParams {
    /// Curve name, e.g. `P-256`
    pub crv: String,
    /// X coordinate
    #[serde(with = "base64url")]
    pub x: Vec<u8>,
    /// Y coordinate
    #[serde(with = "base64url")]
    pub y: Vec<u8>,
    /// Private scalar
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64url::option")]
    pub d: Option<Vec<u8>>,
}

/// Symmetric key members (RFC 7518 §6.4)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OctParams {
    /// Key value
    #[serde(with = "base64url")]
    pub k: Vec<u8>,
}

impl Jwk {
    /// JWK carrying the private (and public) members of `key`
    #[must_use]
    pub fn from_private_key(key: &PrivateKey) -> Self {
        let params = match key {
            PrivateKey::Rsa(key) => KeyParams::Rsa(rsa_private_params(key)),
            PrivateKey::P256(secret) => ec_private_params(key, secret.to_bytes().to_vec()),
            PrivateKey::P384(secret) => ec_private_params(key, secret.to_bytes().to_vec()),
            PrivateKey::P521(secret) => ec_private_params(key, secret.to_bytes().to_vec()),
        };
        Self::from_params(params)
    }

    /// JWK carrying only the public members of `key`
    #[must_use]
    pub fn from_public_key(key: &PublicKey) -> Self {
        let params = match key {
            PublicKey::Rsa(key) => KeyParams::Rsa(rsa_public_params(key)),
            _ => {
                let (x, y) = key.ec_coordinates().unwrap_or_default();
                let crv = key.curve().map(Curve::name).unwrap_or_default();
                KeyParams::Ec(EcParams {
                    crv: crv.to_string(),
                    x,
                    y,
                    d: None,
                })
            }
        };
        Self::from_params(params)
    }

    /// Symmetric JWK holding `secret`
    #[must_use]
    pub fn from_secret(secret: &[u8]) -> Self {
        Self::from_params(KeyParams::Oct(OctParams { k: secret.to_vec() }))
    }

    fn from_params(params: KeyParams) -> Self {
        Self {
            params,
            key_use: None,
            alg: None,
            kid: None,
        }
    }

    /// Set the `use` member
    #[must_use]
    pub fn with_key_use(mut self, key_use: impl Into<String>) -> Self {
        self.key_use = Some(key_use.into());
        self
    }

    /// Set the `alg` member
    #[must_use]
    pub fn with_algorithm(mut self, alg: impl Into<String>) -> Self {
        self.alg = Some(alg.into());
        self
    }

    /// Set the `kid` member
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// The `kty` member
    #[must_use]
    pub fn key_type(&self) -> &'static str {
        match self.params {
            KeyParams::Rsa(_) => "RSA",
            KeyParams::Ec(_) => "EC",
            KeyParams::Oct(_) => "oct",
        }
    }

    /// Whether the JWK holds secret material
    #[must_use]
    pub fn is_private(&self) -> bool {
        match &self.params {
            KeyParams::Rsa(params) => params.d.is_some(),
            KeyParams::Ec(params) => params.d.is_some(),
            KeyParams::Oct(_) => true,
        }
    }

    /// Copy of this JWK without private members
    ///
    /// Symmetric keys have no public half and are returned unchanged.
    #[must_use]
    pub fn to_public(&self) -> Self {
        let params = match &self.params {
            KeyParams::Rsa(params) => KeyParams::Rsa(RsaParams {
                n: params.n.clone(),
                e: params.e.clone(),
                d: None,
                p: None,
                q: None,
                dp: None,
                dq: None,
                qi: None,
            }),
            KeyParams::Ec(params) => KeyParams::Ec(EcParams {
                d: None,
                ..params.clone()
            }),
            KeyParams::Oct(params) => KeyParams::Oct(params.clone()),
        };
        Self {
            params,
            ..self.clone()
        }
    }

    /// Secret of an `oct` key
    #[must_use]
    pub fn secret(&self) -> Option<&[u8]> {
        match &self.params {
            KeyParams::Oct(params) => Some(&params.k),
            _ => None,
        }
    }

    /// Decode the public key (also works for private JWKs)
    pub fn to_public_key(&self) -> Result<PublicKey> {
        match &self.params {
            KeyParams::Rsa(params) => {
                let key = RsaPublicKey::new(
                    BigUint::from_bytes_be(&params.n),
                    BigUint::from_bytes_be(&params.e),
                )?;
                Ok(PublicKey::Rsa(key))
            }
            KeyParams::Ec(params) => {
                let curve = Curve::from_name(&params.crv)?;
                PublicKey::from_ec_coordinates(curve, &params.x, &params.y)
            }
            KeyParams::Oct(_) => Err(KeyError::NotAsymmetric("oct")),
        }
    }

    /// Decode the private key
    pub fn to_private_key(&self) -> Result<PrivateKey> {
        match &self.params {
            KeyParams::Rsa(params) => rsa_private_key(params),
            KeyParams::Ec(params) => ec_private_key(params),
            KeyParams::Oct(_) => Err(KeyError::NotAsymmetric("oct")),
        }
    }
}

fn rsa_public_params(key: &RsaPublicKey) -> RsaParams {
    RsaParams {
        n: key.n().to_bytes_be(),
        e: key.e().to_bytes_be(),
        d: None,
        p: None,
        q: None,
        dp: None,
        dq: None,
        qi: None,
    }
}

fn rsa_private_params(key: &RsaPrivateKey) -> RsaParams {
    let mut params = rsa_public_params(&key.to_public_key());
    params.d = Some(key.d().to_bytes_be());

    // CRT members are only defined for two-prime keys
    if let [p, q] = key.primes() {
        let one = BigUint::from(1u32);
        let two = BigUint::from(2u32);
        params.dp = Some((key.d() % (p - &one)).to_bytes_be());
        params.dq = Some((key.d() % (q - &one)).to_bytes_be());
        // q^(p-2) mod p == q^-1 mod p for prime p
        params.qi = Some(q.modpow(&(p - &two), p).to_bytes_be());
        params.p = Some(p.to_bytes_be());
        params.q = Some(q.to_bytes_be());
    }
    params
}

fn ec_private_params(key: &PrivateKey, d: Vec<u8>) -> KeyParams {
    match Jwk::from_public_key(&key.public_key()).params {
        KeyParams::Ec(public) => KeyParams::Ec(EcParams {
            d: Some(d),
            ..public
        }),
        other => other,
    }
}

fn rsa_private_key(params: &RsaParams) -> Result<PrivateKey> {
    let d = params.d.as_deref().ok_or(KeyError::MissingParameter("d"))?;
    let primes = match (params.p.as_deref(), params.q.as_deref()) {
        (Some(p), Some(q)) => vec![BigUint::from_bytes_be(p), BigUint::from_bytes_be(q)],
        (None, None) => Vec::new(),
        _ => {
            return Err(KeyError::invalid_parameter(
                "p",
                "p and q must be given together",
            ));
        }
    };

    let key = RsaPrivateKey::from_components(
        BigUint::from_bytes_be(&params.n),
        BigUint::from_bytes_be(&params.e),
        BigUint::from_bytes_be(d),
        primes,
    )?;
    key.validate()?;
    Ok(PrivateKey::Rsa(Box::new(key)))
}

fn ec_private_key(params: &EcParams) -> Result<PrivateKey> {
    let curve = Curve::from_name(&params.crv)?;
    let d = params.d.as_deref().ok_or(KeyError::MissingParameter("d"))?;
    if d.len() != curve.field_size() {
        return Err(KeyError::invalid_parameter(
            "d",
            format!(
                "expected {} bytes for {}, got {}",
                curve.field_size(),
                curve.name(),
                d.len()
            ),
        ));
    }

    let key = match curve {
        Curve::P256 => PrivateKey::P256(p256::SecretKey::from_slice(d)?),
        Curve::P384 => PrivateKey::P384(p384::SecretKey::from_slice(d)?),
        Curve::P521 => PrivateKey::P521(p521::SecretKey::from_slice(d)?),
    };

    let declared = PublicKey::from_ec_coordinates(curve, &params.x, &params.y)?;
    if key.public_key() != declared {
        return Err(KeyError::invalid_parameter(
            "d",
            "private scalar does not match x/y",
        ));
    }
    Ok(key)
}

/// JWK set (RFC 7517 §5)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    /// Member keys, in document order
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Empty set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JWK set document, or a single JWK as a set of one
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let document: serde_json::Value = serde_json::from_slice(data)?;
        if document.get("keys").is_some() {
            Ok(serde_json::from_value(document)?)
        } else {
            let jwk: Jwk = serde_json::from_value(document)?;
            Ok(Self { keys: vec![jwk] })
        }
    }

    /// Append a key
    pub fn push(&mut self, jwk: Jwk) {
        self.keys.push(jwk);
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the set has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys whose `kid` equals `kid`, in set order
    #[must_use]
    pub fn lookup_key_id(&self, kid: &str) -> Vec<&Jwk> {
        self.keys
            .iter()
            .filter(|jwk| jwk.kid.as_deref() == Some(kid))
            .collect()
    }

    /// Copy of the set with every key reduced to its public members
    #[must_use]
    pub fn to_public(&self) -> Self {
        Self {
            keys: self.keys.iter().map(Jwk::to_public).collect(),
        }
    }
}

impl FromIterator<Jwk> for JwkSet {
    fn from_iter<I: IntoIterator<Item = Jwk>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}
