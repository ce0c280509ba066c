//! JSON Web Keys and key material loading
//!
//! * [`Jwk`] / [`JwkSet`]: the RFC 7517 object model
//! * [`PrivateKey`] / [`PublicKey`]: RSA and NIST-curve keys with their DER codecs
//! * [`generate_private_key`]: fresh keys for a JWS algorithm
//! * [`load_public_key`] / [`load_private_key`]: decode key files whose
//!   format is not known in advance

mod base64url;
pub mod error;
pub mod generate;
pub mod jwk;
pub mod keys;
pub mod loader;

pub use error::{KeyError, LoadError, Result};
pub use generate::{DEFAULT_RSA_BITS, KeyAlgorithm, generate_private_key};
pub use jwk::{EcParams, Jwk, JwkSet, KeyParams, OctParams, RsaParams};
pub use keys::{Curve, PrivateKey, PublicKey};
pub use loader::{PrivateKeyMaterial, PublicKeyMaterial, load_private_key, load_public_key};
