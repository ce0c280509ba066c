//! `jwt sign`: sign a claims document

use jose_common::{read_input, write_output};
use jose_jwk::{PrivateKeyMaterial, load_private_key};
use jose_jwt::{Claims, SigningKey, sign};
use log::debug;

use crate::config::{KeySource, SignOptions};
use crate::error::{CliError, Result};
use crate::keys::select;

/// Signing key plus the kid to announce in the header
fn resolve_key(options: &SignOptions) -> Result<(SigningKey, Option<String>)> {
    let path = match &options.key {
        KeySource::Secret(secret) => {
            return Ok((SigningKey::hmac(secret.as_bytes()), options.kid.clone()));
        }
        KeySource::File(path) => path,
    };

    let data = read_input(Some(path))?;
    match load_private_key(&data).map_err(CliError::key("unable to load private key"))? {
        PrivateKeyMaterial::Single(key) => Ok((SigningKey::Private(key), options.kid.clone())),
        PrivateKeyMaterial::KeySet(set) => {
            let jwk = select(&set, options.kid.as_deref())?;
            let key = jwk
                .to_private_key()
                .map_err(CliError::key("unable to use JWK"))?;
            Ok((SigningKey::Private(key), jwk.kid.clone().or_else(|| options.kid.clone())))
        }
    }
}

/// Sign the claims and write the compact token
pub fn run(options: &SignOptions) -> Result<()> {
    let (key, kid) = resolve_key(options)?;

    let raw = read_input(options.claims.as_deref())?;
    let claims = Claims::from_json(&raw).map_err(CliError::jwt("unable to parse claims"))?;

    let token = sign(&claims, options.algorithm, &key, kid.as_deref())
        .map_err(CliError::jwt("signing failure"))?;
    debug!("signed token with {} (kid {kid:?})", options.algorithm);

    write_output(options.output.as_deref(), token.as_bytes())?;
    Ok(())
}
