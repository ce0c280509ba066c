//! jose-tool: JWK set generation and JWT parsing, signing and verification
//!
//! [`run`] dispatches a parsed [`Cli`] to the matching command after turning
//! its flags into the command's option record.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod keys;

pub use cli::Cli;
pub use error::{CliError, Result};

use cli::{Command, JwkCommand, JwtCommand};
use config::{GenerateOptions, ParseOptions, SignOptions, VerifyOptions};

/// Execute the selected subcommand
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Jwk(JwkCommand::Generate(args)) => {
            commands::generate::run(&GenerateOptions::try_from(args)?)
        }
        Command::Jwt(JwtCommand::Parse(args)) => commands::parse::run(&ParseOptions::from(args)),
        Command::Jwt(JwtCommand::Sign(args)) => commands::sign::run(&SignOptions::try_from(args)?),
        Command::Jwt(JwtCommand::Verify(args)) => {
            commands::verify::run(&VerifyOptions::try_from(args)?)
        }
    }
}
