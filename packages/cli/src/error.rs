//! Command error type

use jose_common::IoError;
use jose_jwk::KeyError;
use jose_jwt::JwtError;
use thiserror::Error;

/// Command result type
pub type Result<T> = std::result::Result<T, CliError>;

/// Any failure that ends a command with exit status 1
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad flag combination or value, detected before any I/O
    #[error("error: {0}")]
    Usage(String),
    /// Reading input or writing output failed
    #[error(transparent)]
    Io(#[from] IoError),
    /// Key material could not be loaded, converted or generated
    #[error("{context}: {source}")]
    Key {
        /// What was being done
        context: &'static str,
        /// Underlying key error
        source: KeyError,
    },
    /// Token could not be built, signed or decoded
    #[error("{context}: {source}")]
    Jwt {
        /// What was being done
        context: &'static str,
        /// Underlying token error
        source: JwtError,
    },
    /// `--kid` matched no member of the key set
    #[error("kid {0:?} not found")]
    KidNotFound(String),
    /// The key set has no members to choose from
    #[error("key set is empty")]
    EmptyKeySet,
}

impl CliError {
    /// Usage error with `msg`
    pub fn usage(msg: impl Into<String>) -> Self {
        CliError::Usage(msg.into())
    }

    /// `map_err` adapter wrapping a [`KeyError`] with `context`
    pub fn key(context: &'static str) -> impl FnOnce(KeyError) -> Self {
        move |source| CliError::Key { context, source }
    }

    /// `map_err` adapter wrapping a [`JwtError`] with `context`
    pub fn jwt(context: &'static str) -> impl FnOnce(JwtError) -> Self {
        move |source| CliError::Jwt { context, source }
    }
}
