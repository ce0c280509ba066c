//! Choosing one key out of a key set

use jose_jwk::{Jwk, JwkSet, PublicKey};
use log::warn;

use crate::error::{CliError, Result};

/// A collection of keys addressable by key id
pub trait KeyCollection {
    /// Member type
    type Member;

    /// All members, in collection order
    fn members(&self) -> &[Self::Member];

    /// Members whose id equals `kid`, in collection order
    fn lookup(&self, kid: &str) -> Vec<&Self::Member>;
}

impl KeyCollection for JwkSet {
    type Member = Jwk;

    fn members(&self) -> &[Jwk] {
        &self.keys
    }

    fn lookup(&self, kid: &str) -> Vec<&Jwk> {
        self.lookup_key_id(kid)
    }
}

impl KeyCollection for [(String, PublicKey)] {
    type Member = (String, PublicKey);

    fn members(&self) -> &[(String, PublicKey)] {
        self
    }

    fn lookup(&self, kid: &str) -> Vec<&(String, PublicKey)> {
        self.iter().filter(|(id, _)| id == kid).collect()
    }
}

/// Pick the member to use
///
/// With a `kid` the first member carrying it wins; without one the first
/// member of the collection is used. Both fallbacks are logged as warnings.
pub fn select<'a, C>(keys: &'a C, kid: Option<&str>) -> Result<&'a C::Member>
where
    C: KeyCollection + ?Sized,
{
    match kid {
        Some(kid) => {
            let matches = keys.lookup(kid);
            let first = matches
                .first()
                .copied()
                .ok_or_else(|| CliError::KidNotFound(kid.to_string()))?;
            if matches.len() > 1 {
                warn!(
                    "found {} keys with kid {kid:?}, using the first one",
                    matches.len()
                );
            }
            Ok(first)
        }
        None => {
            let first = keys.members().first().ok_or(CliError::EmptyKeySet)?;
            warn!("using key set without kid, using the first one");
            Ok(first)
        }
    }
}
