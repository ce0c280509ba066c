//! Subcommand implementations

pub mod generate;
pub mod parse;
pub mod sign;
pub mod verify;

use chrono::SecondsFormat;
use jose_jwt::Claims;

use crate::error::Result;

/// Print the `\n----` separator, then one line per non-zero time claim
fn print_dates(claims: &Claims) -> Result<()> {
    jose_common::print_line("\n----")?;
    for (name, date) in [
        ("nbf", claims.not_before()),
        ("iat", claims.issued_at()),
        ("exp", claims.expiration()),
    ] {
        if let Some(date) = date {
            jose_common::print_line(&format!(
                "{name} -> {}",
                date.to_rfc3339_opts(SecondsFormat::Secs, true)
            ))?;
        }
    }
    Ok(())
}
