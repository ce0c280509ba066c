//! `jwt verify`: check a token's signature and show its claims

use jose_common::{print_line, read_input, write_json};
use jose_jwk::{PublicKeyMaterial, load_public_key};
use jose_jwt::{VerifyingKey, decode_unverified, verify};

use super::print_dates;
use crate::config::{KeySource, VerifyOptions};
use crate::error::{CliError, Result};
use crate::keys::select;

fn resolve_key(options: &VerifyOptions) -> Result<VerifyingKey> {
    let path = match &options.key {
        KeySource::Secret(secret) => return Ok(VerifyingKey::hmac(secret.as_bytes())),
        KeySource::File(path) => path,
    };

    let data = read_input(Some(path))?;
    let key = match load_public_key(&data).map_err(CliError::key("unable to load public key"))? {
        PublicKeyMaterial::Single(key) => key,
        PublicKeyMaterial::KeySet(set) => select(&set, options.kid.as_deref())?
            .to_public_key()
            .map_err(CliError::key("unable to use JWK"))?,
        PublicKeyMaterial::KeyMap(entries) => {
            select(entries.as_slice(), options.kid.as_deref())?.1.clone()
        }
    };
    Ok(VerifyingKey::Public(key))
}

/// Verify the token and write its claims
///
/// A bad signature is reported on stdout and the claims are still written;
/// only a token that cannot be decoded at all is an error.
pub fn run(options: &VerifyOptions) -> Result<()> {
    let raw = read_input(options.input.as_deref())?;
    let key = resolve_key(options)?;
    let token = String::from_utf8_lossy(&raw);

    let decoded = match verify(&token, options.algorithm, &key) {
        Ok(decoded) => {
            print_line("signature OK")?;
            decoded
        }
        Err(err) => {
            print_line(&format!("signature NOT OK, err: {err}"))?;
            decode_unverified(&token).map_err(CliError::jwt("unable to parse"))?
        }
    };

    write_json(options.output.as_deref(), &decoded.claims)?;
    if options.show_dates {
        print_dates(&decoded.claims)?;
    }
    Ok(())
}
