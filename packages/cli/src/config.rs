//! Per-command options
//!
//! Parsed flags are converted once into immutable option records. All flag
//! validation happens in those conversions, before any input is read.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;
use jose_jwk::KeyAlgorithm;
use jose_jwt::Algorithm;

use crate::cli::{GenerateArgs, ParseArgs, SignArgs, VerifyArgs};
use crate::error::{CliError, Result};

/// Smallest RSA modulus `jwk generate` accepts
pub const MIN_RSA_BITS: usize = 512;

/// How generated keys get their `kid`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KidFormat {
    /// `<YYYY-MM-DD>:<index>`, UTC date of the run
    DateSequence,
    /// Taken in order from `--kids`
    Provided,
    /// No `kid`
    None,
}

impl FromStr for KidFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "date:sequence" => Ok(KidFormat::DateSequence),
            "provided" => Ok(KidFormat::Provided),
            "" | "none" => Ok(KidFormat::None),
            other => Err(CliError::usage(format!(
                "unknown kid format {other:?}, expected date:sequence, provided or none"
            ))),
        }
    }
}

/// `jwk generate` options
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Number of keys, at least 1
    pub count: usize,
    /// Algorithm the keys are for
    pub algorithm: KeyAlgorithm,
    /// RSA modulus size
    pub rsa_bits: usize,
    /// kid assignment
    pub kid_format: KidFormat,
    /// kids for [`KidFormat::Provided`], exactly `count` of them
    pub kids: Vec<String>,
    /// Public set destination, stdout when `None`
    pub public_output: Option<PathBuf>,
    /// Private set destination, stdout when `None`
    pub private_output: Option<PathBuf>,
}

impl GenerateOptions {
    /// kid for each key to generate, in order
    pub fn key_ids(&self, today: NaiveDate) -> Vec<Option<String>> {
        match self.kid_format {
            KidFormat::DateSequence => {
                let date = today.format("%Y-%m-%d");
                (0..self.count).map(|i| Some(format!("{date}:{i}"))).collect()
            }
            KidFormat::Provided => self.kids.iter().cloned().map(Some).collect(),
            KidFormat::None => vec![None; self.count],
        }
    }
}

impl TryFrom<GenerateArgs> for GenerateOptions {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self> {
        let count = usize::try_from(args.count)
            .ok()
            .filter(|&count| count >= 1)
            .ok_or_else(|| CliError::usage("n must be at least 1"))?;
        let algorithm = args
            .alg
            .parse::<KeyAlgorithm>()
            .map_err(CliError::key("unsupported key type"))?;
        if algorithm.curve().is_none() && args.key_length < MIN_RSA_BITS {
            return Err(CliError::usage(format!(
                "RSA key length must be at least {MIN_RSA_BITS} bits"
            )));
        }

        let kid_format = args.kid_format.parse::<KidFormat>()?;
        if kid_format == KidFormat::Provided && args.kids.len() != count {
            return Err(CliError::usage(format!(
                "-n({count}) must be == len(--kids)({})",
                args.kids.len()
            )));
        }

        Ok(Self {
            count,
            algorithm,
            rsa_bits: args.key_length,
            kid_format,
            kids: args.kids,
            public_output: args.public_output,
            private_output: args.private_output,
        })
    }
}

/// Where the signing or verification key comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    /// HS algorithms: the flag value is the shared secret
    Secret(String),
    /// Other algorithms: the flag value names a key file
    File(PathBuf),
}

fn parse_algorithm(alg: &str) -> Result<Algorithm> {
    alg.parse::<Algorithm>()
        .map_err(CliError::jwt("wrong signature algorithm"))
}

fn key_source(key: Option<String>, algorithm: Algorithm) -> Result<KeySource> {
    let key = key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| CliError::usage("expecting a key filename or string"))?;
    Ok(if algorithm.is_hmac() {
        KeySource::Secret(key)
    } else {
        KeySource::File(PathBuf::from(key))
    })
}

/// `jwt parse` options
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Token source, stdin when `None`
    pub input: Option<PathBuf>,
    /// Claims destination, stdout when `None`
    pub output: Option<PathBuf>,
    /// Print time claims as dates
    pub show_dates: bool,
}

impl From<ParseArgs> for ParseOptions {
    fn from(args: ParseArgs) -> Self {
        Self {
            input: args.input,
            output: args.output,
            show_dates: args.todt,
        }
    }
}

/// `jwt sign` options
#[derive(Debug, Clone)]
pub struct SignOptions {
    /// Signing key
    pub key: KeySource,
    /// Claims source, stdin when `None`
    pub claims: Option<PathBuf>,
    /// Signature algorithm
    pub algorithm: Algorithm,
    /// Key id to select and to put in the header
    pub kid: Option<String>,
    /// Token destination, stdout when `None`
    pub output: Option<PathBuf>,
}

impl TryFrom<SignArgs> for SignOptions {
    type Error = CliError;

    fn try_from(args: SignArgs) -> Result<Self> {
        let algorithm = parse_algorithm(&args.alg)?;
        Ok(Self {
            key: key_source(args.key, algorithm)?,
            claims: args.claims,
            algorithm,
            kid: args.kid,
            output: args.output,
        })
    }
}

/// `jwt verify` options
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    /// Verification key
    pub key: KeySource,
    /// Token source, stdin when `None`
    pub input: Option<PathBuf>,
    /// Expected signature algorithm
    pub algorithm: Algorithm,
    /// Key id to select
    pub kid: Option<String>,
    /// Claims destination, stdout when `None`
    pub output: Option<PathBuf>,
    /// Print time claims as dates
    pub show_dates: bool,
}

impl TryFrom<VerifyArgs> for VerifyOptions {
    type Error = CliError;

    fn try_from(args: VerifyArgs) -> Result<Self> {
        let algorithm = parse_algorithm(&args.alg)?;
        Ok(Self {
            key: key_source(args.key, algorithm)?,
            input: args.input,
            algorithm,
            kid: args.kid,
            output: args.output,
            show_dates: args.todt,
        })
    }
}
