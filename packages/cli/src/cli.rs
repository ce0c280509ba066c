//! Command line definition

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use jose_jwk::DEFAULT_RSA_BITS;

#[derive(Debug, Parser)]
#[command(name = "jose-tool", version)]
#[command(about = "jose tool")]
#[command(long_about = "Command line tool to manage JOSE stuff, including JWT, JWKs and the like")]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Handle JWK and JWK sets
    #[command(subcommand)]
    Jwk(JwkCommand),
    /// Handle JWT
    #[command(subcommand)]
    Jwt(JwtCommand),
}

#[derive(Debug, Subcommand)]
pub enum JwkCommand {
    /// Generate a JWK set
    ///
    /// Writes the private set, then the public set. A set written to stdout
    /// is framed by `---- Begin/End ... keys ----` lines.
    Generate(GenerateArgs),
}

#[derive(Debug, Subcommand)]
pub enum JwtCommand {
    /// Parse a JWT payload (without verifying anything)
    Parse(ParseArgs),
    /// Sign a JWT payload
    Sign(SignArgs),
    /// Verify a JWS (signed JWT)
    Verify(VerifyArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Number of JWKs to generate in the set
    #[arg(short = 'n', long = "jwks", default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Algorithm: RS256, RS384, RS512, PS256, PS384, PS512, ES256, ES384 or ES512
    #[arg(short, long, default_value = "RS256")]
    pub alg: String,

    /// RSA key length in bits
    #[arg(long = "klength", default_value_t = DEFAULT_RSA_BITS)]
    pub key_length: usize,

    /// kid format: date:sequence, provided, or none (empty also disables kids)
    #[arg(short = 'k', long = "kidf", default_value = "date:sequence")]
    pub kid_format: String,

    /// kids to assign with --kidf provided (one per key)
    #[arg(long, value_delimiter = ',')]
    pub kids: Vec<String>,

    /// Public keys output file
    #[arg(short = 'o', long = "public-output")]
    pub public_output: Option<PathBuf>,

    /// Private keys output file
    #[arg(short = 'p', long = "private-output")]
    pub private_output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print nbf/iat/exp as RFC 3339 dates (on stdout)
    #[arg(short = 't', long = "todt")]
    pub todt: bool,
}

#[derive(Debug, Args)]
pub struct SignArgs {
    /// Private key file, or the secret itself for HS algorithms
    #[arg(short, long)]
    pub key: Option<String>,

    /// Claims JSON file (stdin when omitted)
    #[arg(short, long)]
    pub claims: Option<PathBuf>,

    /// Signature algorithm
    #[arg(short, long, default_value = "RS256")]
    pub alg: String,

    /// Private key id (for JWK sets)
    #[arg(long)]
    pub kid: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Public key file, or the secret itself for HS algorithms
    #[arg(short, long)]
    pub key: Option<String>,

    /// Input file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Signature algorithm
    #[arg(short, long, default_value = "RS256")]
    pub alg: String,

    /// Public key id (for JWK sets and key maps)
    #[arg(long)]
    pub kid: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print nbf/iat/exp as RFC 3339 dates (on stdout); `--todt=false` to skip
    #[arg(
        short = 't',
        long = "todt",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true"
    )]
    pub todt: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn kids_are_comma_separated() {
        let cli = Cli::parse_from([
            "jose-tool", "jwk", "generate", "-n", "2", "-k", "provided", "--kids", "a,b",
        ]);
        let Command::Jwk(JwkCommand::Generate(args)) = cli.command else {
            panic!("expected jwk generate");
        };
        assert_eq!(args.kids, ["a", "b"]);
        assert_eq!(args.alg, "RS256");
    }

    #[test]
    fn negative_count_reaches_validation() {
        let cli = Cli::parse_from(["jose-tool", "jwk", "generate", "-n", "-1"]);
        let Command::Jwk(JwkCommand::Generate(args)) = cli.command else {
            panic!("expected jwk generate");
        };
        assert_eq!(args.count, -1);
    }

    fn todt(extra: &[&str]) -> bool {
        let mut argv = vec!["jose-tool", "jwt", "verify", "-k", "secret"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::Jwt(JwtCommand::Verify(args)) => args.todt,
            other => panic!("expected jwt verify, got {other:?}"),
        }
    }

    #[test]
    fn verify_shows_dates_by_default() {
        assert!(todt(&[]));
        assert!(todt(&["-t"]));
        assert!(!todt(&["--todt=false"]));
        assert!(!todt(&["-t", "false"]));
    }
}
