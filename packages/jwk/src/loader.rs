//! Key material loading from buffers of unknown encoding
//!
//! Every loader runs an ordered list of format attempts over the same input
//! and returns the first one that decodes. When none does, the caller gets a
//! [`LoadError`] listing each format with the reason it was rejected.
//!
//! Public key formats, in order:
//!
//! 1. `jwk`: a JWK set, or a single JWK
//! 2. `firebase`: a JSON object mapping key ids to PEM (or base64 DER)
//!    public keys or certificates
//! 3. `spki`: a SubjectPublicKeyInfo, PEM or DER
//! 4. `certificate`: an X.509 certificate, PEM or DER
//!
//! Private key formats, in order: `jwk`, then PKCS#1, PKCS#8 and SEC1, each
//! accepting PEM or DER.

use std::borrow::Cow;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::debug;
use serde_json::Value;

use crate::error::{KeyError, LoadError, Result};
use crate::jwk::JwkSet;
use crate::keys::{PrivateKey, PublicKey};

/// Decoded public key input
#[derive(Debug, Clone)]
pub enum PublicKeyMaterial {
    /// JWK set (a lone JWK becomes a set of one)
    KeySet(JwkSet),
    /// Key id → key map, in document order
    KeyMap(Vec<(String, PublicKey)>),
    /// A single key from SPKI or a certificate
    Single(PublicKey),
}

/// Decoded private key input
#[derive(Debug, Clone)]
pub enum PrivateKeyMaterial {
    /// JWK set (a lone JWK becomes a set of one)
    KeySet(JwkSet),
    /// A single key from PKCS#1, PKCS#8 or SEC1
    Single(PrivateKey),
}

type Attempt<T> = (&'static str, fn(&[u8]) -> Result<T>);

const PUBLIC_KEY_FORMATS: &[Attempt<PublicKeyMaterial>] = &[
    ("jwk", public_from_jwk),
    ("firebase", public_from_firebase),
    ("spki", public_from_spki),
    ("certificate", public_from_certificate),
];

const PRIVATE_KEY_FORMATS: &[Attempt<PrivateKeyMaterial>] = &[
    ("jwk", private_from_jwk),
    ("pkcs1", private_from_pkcs1),
    ("pkcs8", private_from_pkcs8),
    ("sec1", private_from_sec1),
];

/// Decode public key material in any supported format
pub fn load_public_key(data: &[u8]) -> Result<PublicKeyMaterial> {
    first_match("public key", data, PUBLIC_KEY_FORMATS)
}

/// Decode private key material in any supported format
pub fn load_private_key(data: &[u8]) -> Result<PrivateKeyMaterial> {
    first_match("private key", data, PRIVATE_KEY_FORMATS)
}

fn first_match<T>(what: &'static str, data: &[u8], attempts: &[Attempt<T>]) -> Result<T> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(KeyError::EmptyInput);
    }

    let mut failures = Vec::with_capacity(attempts.len());
    for (name, attempt) in attempts {
        match attempt(data) {
            Ok(value) => {
                debug!("{what} decoded as {name}");
                return Ok(value);
            }
            Err(err) => {
                debug!("{what} is not {name}: {err}");
                failures.push((*name, err));
            }
        }
    }
    Err(LoadError::new(what, failures).into())
}

/// Contents of the first PEM block, or the input itself when it is not PEM
fn unwrap_pem(data: &[u8]) -> Cow<'_, [u8]> {
    match pem::parse(data) {
        Ok(block) => Cow::Owned(block.into_contents()),
        Err(_) => Cow::Borrowed(data),
    }
}

fn public_from_jwk(data: &[u8]) -> Result<PublicKeyMaterial> {
    Ok(PublicKeyMaterial::KeySet(JwkSet::from_json(data)?))
}

fn public_from_firebase(data: &[u8]) -> Result<PublicKeyMaterial> {
    let map: serde_json::Map<String, Value> = serde_json::from_slice(data)?;
    if map.is_empty() {
        return Err(KeyError::NotFirebaseMap("no entries".to_string()));
    }

    map.into_iter()
        .map(|(kid, value)| {
            let Value::String(text) = value else {
                return Err(KeyError::NotFirebaseMap(format!(
                    "value of {kid:?} is not a string"
                )));
            };
            let key = firebase_entry(text.as_bytes())
                .map_err(|err| KeyError::NotFirebaseMap(format!("entry {kid:?}: {err}")))?;
            Ok((kid, key))
        })
        .collect::<Result<Vec<_>>>()
        .map(PublicKeyMaterial::KeyMap)
}

fn firebase_entry(text: &[u8]) -> Result<PublicKey> {
    let der = match pem::parse(text) {
        Ok(block) => block.into_contents(),
        Err(_) => STANDARD.decode(text.trim_ascii())?,
    };
    PublicKey::from_spki_der(&der).or_else(|_| PublicKey::from_certificate_der(&der))
}

fn public_from_spki(data: &[u8]) -> Result<PublicKeyMaterial> {
    let der = unwrap_pem(data);
    Ok(PublicKeyMaterial::Single(PublicKey::from_spki_der(&der)?))
}

fn public_from_certificate(data: &[u8]) -> Result<PublicKeyMaterial> {
    let der = unwrap_pem(data);
    Ok(PublicKeyMaterial::Single(PublicKey::from_certificate_der(
        &der,
    )?))
}

fn private_from_jwk(data: &[u8]) -> Result<PrivateKeyMaterial> {
    Ok(PrivateKeyMaterial::KeySet(JwkSet::from_json(data)?))
}

fn private_from_pkcs1(data: &[u8]) -> Result<PrivateKeyMaterial> {
    let der = unwrap_pem(data);
    Ok(PrivateKeyMaterial::Single(PrivateKey::from_pkcs1_der(&der)?))
}

fn private_from_pkcs8(data: &[u8]) -> Result<PrivateKeyMaterial> {
    let der = unwrap_pem(data);
    Ok(PrivateKeyMaterial::Single(PrivateKey::from_pkcs8_der(&der)?))
}

fn private_from_sec1(data: &[u8]) -> Result<PrivateKeyMaterial> {
    let der = unwrap_pem(data);
    Ok(PrivateKeyMaterial::Single(PrivateKey::from_sec1_der(&der)?))
}
