//! `jwt parse`: decode a token without verifying it

use jose_common::{read_input, write_json};
use jose_jwt::decode_unverified;

use super::print_dates;
use crate::config::ParseOptions;
use crate::error::{CliError, Result};

/// Decode the token and write its claims as JSON
pub fn run(options: &ParseOptions) -> Result<()> {
    let raw = read_input(options.input.as_deref())?;
    let token = decode_unverified(&String::from_utf8_lossy(&raw))
        .map_err(CliError::jwt("unable to parse"))?;

    write_json(options.output.as_deref(), &token.claims)?;
    if options.show_dates {
        print_dates(&token.claims)?;
    }
    Ok(())
}
