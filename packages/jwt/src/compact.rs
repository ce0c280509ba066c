//! JWS compact serialization: `header.payload.signature`

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use log::debug;
use serde::Serialize;

use crate::algorithms::Algorithm;
use crate::crypto;
use crate::error::{JwtError, JwtResult};
use crate::keys::{SigningKey, VerifyingKey};
use crate::types::{Claims, Header, Token};

fn encode_segment<T: Serialize>(value: &T) -> JwtResult<String> {
    let json = serde_json::to_vec(value).map_err(JwtError::serialization)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment(name: &str, segment: &str) -> JwtResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|err| JwtError::invalid_token(format!("{name} is not base64url: {err}")))
}

/// Sign `claims` and return the compact token
///
/// The header is `{"alg", "kid"?, "typ": "JWT"}`.
pub fn sign(
    claims: &Claims,
    alg: Algorithm,
    key: &SigningKey,
    kid: Option<&str>,
) -> JwtResult<String> {
    key.check_algorithm(alg)?;

    let mut header = Header::new(alg);
    if let Some(kid) = kid {
        header = header.with_key_id(kid);
    }

    let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(claims)?);
    let signature = crypto::sign(alg, key, signing_input.as_bytes())?;
    debug!("signed {} byte signing input with {alg}", signing_input.len());

    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature)
    ))
}

/// Decode a compact token without checking its signature
///
/// Surrounding whitespace is ignored.
pub fn decode_unverified(token: &str) -> JwtResult<Token> {
    let token = token.trim();
    let mut segments = token.split('.');
    let (Some(header_b64), Some(claims_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::invalid_token(
            "expected three dot-separated segments",
        ));
    };

    let header: Header = serde_json::from_slice(&decode_segment("header", header_b64)?)
        .map_err(|err| JwtError::invalid_token(format!("header: {err}")))?;
    let claims = Claims::from_json(&decode_segment("payload", claims_b64)?)?;
    let signature = decode_segment("signature", signature_b64)?;

    let signing_input = token[..header_b64.len() + 1 + claims_b64.len()].to_string();
    Ok(Token::new(header, claims, signing_input, signature))
}

/// Decode a compact token and check its signature with `key`
///
/// Fails unless the header `alg` equals `alg`. Time-based claims are not
/// checked.
pub fn verify(token: &str, alg: Algorithm, key: &VerifyingKey) -> JwtResult<Token> {
    key.check_algorithm(alg)?;

    let decoded = decode_unverified(token)?;
    if decoded.header.alg != alg.as_str() {
        return Err(JwtError::AlgorithmMismatch {
            expected: alg,
            found: decoded.header.alg.clone(),
        });
    }

    crypto::verify(
        alg,
        key,
        decoded.signing_input().as_bytes(),
        decoded.signature(),
    )?;
    debug!("{alg} signature verified");
    Ok(decoded)
}
