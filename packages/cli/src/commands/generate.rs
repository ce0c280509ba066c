//! `jwk generate`: create a private JWK set and its public counterpart

use std::path::Path;

use chrono::Utc;
use jose_common::{is_stdio, print_line, write_json};
use jose_jwk::{Jwk, JwkSet, generate_private_key};
use log::info;

use crate::config::GenerateOptions;
use crate::error::{CliError, Result};

/// Write `set` as JSON, framed by banners when it goes to stdout
fn emit(label: &str, path: Option<&Path>, set: &JwkSet) -> Result<()> {
    let framed = is_stdio(path);
    if framed {
        print_line(&format!("---- Begin {label} keys ----"))?;
    }
    write_json(path, set)?;
    if framed {
        print_line(&format!("\n---- End {label} keys ----"))?;
    }
    Ok(())
}

/// Generate the key sets and write them, private first
pub fn run(options: &GenerateOptions) -> Result<()> {
    let alg = options.algorithm;
    let mut private_set = JwkSet::new();
    let mut public_set = JwkSet::new();

    for kid in options.key_ids(Utc::now().date_naive()) {
        let key = generate_private_key(alg, options.rsa_bits)
            .map_err(CliError::key("failed to generate private key"))?;

        let mut jwk = Jwk::from_private_key(&key)
            .with_key_use("sig")
            .with_algorithm(alg.as_str());
        if let Some(kid) = kid {
            jwk = jwk.with_key_id(kid);
        }

        public_set.push(jwk.to_public());
        private_set.push(jwk);
    }
    info!("generated {} {alg} key(s)", private_set.len());

    emit("private", options.private_output.as_deref(), &private_set)?;
    emit("public", options.public_output.as_deref(), &public_set)?;
    Ok(())
}
