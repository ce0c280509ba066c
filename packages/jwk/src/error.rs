//! Key handling error types

use std::fmt;

use thiserror::Error;

/// Key operation result type
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors raised while decoding, converting or generating keys
#[derive(Debug, Error)]
pub enum KeyError {
    /// Nothing to decode
    #[error("empty input")]
    EmptyInput,
    /// Not valid JSON, or JSON of the wrong shape
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Not valid base64
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Not a PEM block
    #[error("invalid PEM: {0}")]
    Pem(#[from] pem::PemError),
    /// Malformed DER structure
    #[error("invalid DER: {0}")]
    Der(#[from] der::Error),
    /// Not a PKCS#1 RSA private key
    #[error("invalid PKCS#1 key: {0}")]
    Pkcs1(#[from] rsa::pkcs1::Error),
    /// Not a PKCS#8 private key
    #[error("invalid PKCS#8 key: {0}")]
    Pkcs8(#[from] pkcs8::Error),
    /// Not an X.509 SubjectPublicKeyInfo
    #[error("invalid SubjectPublicKeyInfo: {0}")]
    Spki(#[from] spki::Error),
    /// Invalid elliptic curve key or point
    #[error("invalid EC key: {0}")]
    EllipticCurve(#[from] p256::elliptic_curve::Error),
    /// RSA key construction or generation failed
    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),
    /// Key algorithm OID or JOSE algorithm this tool does not handle
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Named curve this tool does not handle
    #[error("unsupported elliptic curve: {0}")]
    UnsupportedCurve(String),
    /// Required JWK member is absent
    #[error("missing JWK parameter: {0}")]
    MissingParameter(&'static str),
    /// JWK member present but unusable
    #[error("invalid JWK parameter {name}: {reason}")]
    InvalidParameter {
        /// JWK member name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
    /// JSON object that is not an id → PEM/DER map
    #[error("not a 'firebase style' key map: {0}")]
    NotFirebaseMap(String),
    /// Symmetric JWK where an asymmetric key is required
    #[error("JWK of type {0} holds no asymmetric key")]
    NotAsymmetric(&'static str),
    /// Every format in a loader cascade was rejected
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl KeyError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        KeyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Aggregate failure of a format cascade
///
/// Carries the error of every attempted format, in attempt order.
#[derive(Debug)]
pub struct LoadError {
    what: &'static str,
    attempts: Vec<(&'static str, KeyError)>,
}

impl LoadError {
    pub(crate) fn new(what: &'static str, attempts: Vec<(&'static str, KeyError)>) -> Self {
        Self { what, attempts }
    }

    /// What was being loaded, e.g. `public key`
    #[must_use]
    pub fn what(&self) -> &'static str {
        self.what
    }

    /// `(format name, error)` for every format tried
    #[must_use]
    pub fn attempts(&self) -> &[(&'static str, KeyError)] {
        &self.attempts
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse {}", self.what)?;
        for (name, err) in &self.attempts {
            write!(f, "\n  {name}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}
