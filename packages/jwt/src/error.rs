//! JWT error types

use thiserror::Error;

use crate::algorithms::{Algorithm, KeyFamily};

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// JWT error types
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    /// Token is not three base64url segments with JSON object header and claims
    #[error("malformed token: {0}")]
    InvalidToken(String),
    /// A registered claim has the wrong type
    #[error("invalid claims: {0}")]
    InvalidClaims(String),
    /// Signature does not match
    #[error("signature verification failed")]
    InvalidSignature,
    /// Algorithm name not recognised
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
    /// Token header names a different algorithm than requested
    #[error("token is signed with {found}, expected {expected}")]
    AlgorithmMismatch {
        /// Requested algorithm
        expected: Algorithm,
        /// Header `alg`
        found: String,
    },
    /// Key cannot be used with the algorithm
    #[error("{alg} requires a {required}, got a {actual}")]
    KeyMismatch {
        /// Requested algorithm
        alg: Algorithm,
        /// Key kind the algorithm needs
        required: KeyFamily,
        /// Key kind supplied
        actual: KeyFamily,
    },
    /// Key material unusable for the operation
    #[error("invalid key: {0}")]
    InvalidKey(String),
    /// Cryptographic signing failed
    #[error("signing failed: {0}")]
    Signing(String),
    /// Header or claims could not be serialized
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl JwtError {
    /// Create a malformed token error
    #[inline]
    #[must_use]
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        JwtError::InvalidToken(msg.into())
    }

    /// Create an invalid claims error
    #[inline]
    #[must_use]
    pub fn invalid_claims(msg: impl Into<String>) -> Self {
        JwtError::InvalidClaims(msg.into())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(err: impl std::fmt::Display) -> Self {
        JwtError::Signing(err.to_string())
    }

    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(err: impl std::fmt::Display) -> Self {
        JwtError::Serialization(err.to_string())
    }

    pub(crate) fn key_mismatch(alg: Algorithm, actual: KeyFamily) -> Self {
        JwtError::KeyMismatch {
            alg,
            required: alg.family(),
            actual,
        }
    }
}
