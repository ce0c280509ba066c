//! JWT header, claims and decoded token types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::algorithms::Algorithm;
use crate::error::{JwtError, JwtResult};

/// JOSE header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Signature algorithm name, as written in the token
    pub alg: String,
    /// Key identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Media type, `JWT` for tokens this crate produces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Any other header parameters
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// Header for a token signed with `alg`
    #[must_use]
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg: alg.as_str().to_string(),
            kid: None,
            typ: Some("JWT".to_string()),
            extra: Map::new(),
        }
    }

    /// Set the key identifier
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }
}

/// `aud` claim: one audience or several
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// Single audience string
    Single(String),
    /// Array of audiences
    Many(Vec<String>),
}

impl Audience {
    /// Whether `audience` is among the values
    #[must_use]
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(value) => value == audience,
            Audience::Many(values) => values.iter().any(|value| value == audience),
        }
    }
}

/// Seconds since the epoch, integer or fractional (RFC 7519 NumericDate)
///
/// The JSON number is kept as written so re-serialization does not change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericDate(Number);

impl NumericDate {
    /// UTC timestamp; `None` for zero or values out of range
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if let Some(seconds) = self.0.as_i64() {
            return match seconds {
                0 => None,
                _ => DateTime::from_timestamp(seconds, 0),
            };
        }

        let value = self.0.as_f64()?;
        if value == 0.0 || !value.is_finite() {
            return None;
        }
        let seconds = value.floor();
        let nanos = ((value - seconds) * 1e9).round().min(999_999_999.0);
        // Range-checked by from_timestamp; the casts saturate.
        DateTime::from_timestamp(seconds as i64, nanos as u32)
    }
}

/// JWT claims set
///
/// Registered claims are type-checked on decode; everything else lands in
/// [`Claims::extra`] in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<NumericDate>,
    /// Not before
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<NumericDate>,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<NumericDate>,
    /// JWT ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// Private and public claims
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Parse a JSON claims object
    pub fn from_json(data: &[u8]) -> JwtResult<Self> {
        serde_json::from_slice(data).map_err(|err| JwtError::invalid_claims(err.to_string()))
    }

    /// `exp` as a timestamp, `None` when absent or zero
    #[must_use]
    pub fn expiration(&self) -> Option<DateTime<Utc>> {
        self.exp.as_ref().and_then(NumericDate::to_datetime)
    }

    /// `nbf` as a timestamp, `None` when absent or zero
    #[must_use]
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        self.nbf.as_ref().and_then(NumericDate::to_datetime)
    }

    /// `iat` as a timestamp, `None` when absent or zero
    #[must_use]
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.as_ref().and_then(NumericDate::to_datetime)
    }
}

/// A decoded compact JWS
#[derive(Debug, Clone)]
pub struct Token {
    /// Protected header
    pub header: Header,
    /// Payload claims
    pub claims: Claims,
    signing_input: String,
    signature: Vec<u8>,
}

impl Token {
    pub(crate) fn new(
        header: Header,
        claims: Claims,
        signing_input: String,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            header,
            claims,
            signing_input,
            signature,
        }
    }

    /// `header.payload` exactly as it appears in the token
    #[must_use]
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// Decoded signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_dates_keep_subsecond_precision() {
        let date: NumericDate = serde_json::from_str("1700000000.5").expect("number");
        let datetime = date.to_datetime().expect("in range");

        assert_eq!(datetime.timestamp(), 1_700_000_000);
        assert_eq!(datetime.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn zero_is_treated_as_absent() {
        let claims = Claims::from_json(br#"{"exp": 0, "iat": 0.0}"#).expect("claims");

        assert_eq!(claims.expiration(), None);
        assert_eq!(claims.issued_at(), None);
    }

    #[test]
    fn integer_dates_serialize_unchanged() {
        let claims = Claims::from_json(br#"{"exp":1700000000,"role":"admin"}"#).expect("claims");
        let json = serde_json::to_string(&claims).expect("serialize");

        assert_eq!(json, r#"{"exp":1700000000,"role":"admin"}"#);
    }
}
