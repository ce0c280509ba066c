//! Unverified decoding and claims type checks

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{TimeZone, Utc};
use jose_jwt::{Audience, JwtError, decode_unverified};

fn token_with(header: &str, claims: &str) -> String {
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(claims),
        URL_SAFE_NO_PAD.encode(b"sig")
    )
}

#[test]
fn test_decode_trims_whitespace() {
    let token = token_with(r#"{"alg":"RS256","typ":"JWT"}"#, r#"{"sub":"bob"}"#);
    let decoded = decode_unverified(&format!("  {token}\n")).expect("token decodes");

    assert_eq!(decoded.header.alg, "RS256");
    assert_eq!(decoded.claims.sub.as_deref(), Some("bob"));
    assert_eq!(decoded.signature(), b"sig");
    assert!(token.starts_with(decoded.signing_input()));
}

#[test]
fn test_unknown_header_algorithm_still_decodes() {
    let token = token_with(r#"{"alg":"none"}"#, r#"{"custom":{"nested":true}}"#);
    let decoded = decode_unverified(&token).expect("decoding does not check alg");

    assert_eq!(decoded.header.alg, "none");
    assert_eq!(decoded.claims.extra["custom"]["nested"], true);
}

#[test]
fn test_registered_claims_are_type_checked() {
    for claims in [
        r#"{"exp":"tomorrow"}"#,
        r#"{"iss":42}"#,
        r#"{"aud":[1,2]}"#,
        r#"{"nbf":true}"#,
        r#"["not","an","object"]"#,
    ] {
        let token = token_with(r#"{"alg":"HS256"}"#, claims);
        assert!(
            matches!(decode_unverified(&token), Err(JwtError::InvalidClaims(_))),
            "{claims} should be rejected"
        );
    }
}

#[test]
fn test_malformed_segments() {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#);
    let claims = URL_SAFE_NO_PAD.encode("{}");

    for token in [
        format!("{header}.{claims}"),
        format!("{header}.{claims}.sig.extra"),
        format!("!!!.{claims}.c2ln"),
        format!("{}.{claims}.c2ln", URL_SAFE_NO_PAD.encode("[]")),
        format!("{header}.{claims}.c2ln="),
    ] {
        assert!(
            matches!(decode_unverified(&token), Err(JwtError::InvalidToken(_))),
            "{token} should be malformed"
        );
    }
}

#[test]
fn test_audience_and_dates() {
    let token = token_with(
        r#"{"alg":"HS256"}"#,
        r#"{"aud":["api","web"],"nbf":1700000000,"iat":1699999999.25,"exp":0}"#,
    );
    let claims = decode_unverified(&token).expect("token decodes").claims;

    assert_eq!(
        claims.aud,
        Some(Audience::Many(vec!["api".to_string(), "web".to_string()]))
    );
    assert!(claims.aud.as_ref().is_some_and(|aud| aud.contains("web")));
    assert_eq!(
        claims.not_before(),
        Utc.timestamp_opt(1_700_000_000, 0).single()
    );
    assert_eq!(
        claims.issued_at(),
        Utc.timestamp_opt(1_699_999_999, 250_000_000).single()
    );
    assert_eq!(claims.expiration(), None);
}
