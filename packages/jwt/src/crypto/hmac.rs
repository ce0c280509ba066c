//! HMAC-SHA2 signatures (HS256, HS384, HS512)

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use log::warn;
use sha2::{Sha256, Sha384, Sha512};

use crate::algorithms::{Algorithm, KeyFamily};
use crate::error::{JwtError, JwtResult};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

fn keyed<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> JwtResult<M> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| JwtError::InvalidKey("invalid HMAC key length".to_string()))?;
    mac.update(message);
    Ok(mac)
}

fn compute<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    Ok(keyed::<M>(secret, message)?.finalize().into_bytes().to_vec())
}

fn check<M: Mac + KeyInit>(secret: &[u8], message: &[u8], signature: &[u8]) -> JwtResult<()> {
    keyed::<M>(secret, message)?
        .verify_slice(signature)
        .map_err(|_| JwtError::InvalidSignature)
}

pub(super) fn sign(alg: Algorithm, secret: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    // RFC 7518 §3.2: the key must be at least as long as the hash output
    if secret.len() < alg.digest_size() {
        warn!(
            "{alg} secret is {} bytes, shorter than the recommended {}",
            secret.len(),
            alg.digest_size()
        );
    }

    match alg {
        Algorithm::HS256 => compute::<HmacSha256>(secret, message),
        Algorithm::HS384 => compute::<HmacSha384>(secret, message),
        Algorithm::HS512 => compute::<HmacSha512>(secret, message),
        other => Err(JwtError::key_mismatch(other, KeyFamily::Hmac)),
    }
}

pub(super) fn verify(
    alg: Algorithm,
    secret: &[u8],
    message: &[u8],
    signature: &[u8],
) -> JwtResult<()> {
    match alg {
        Algorithm::HS256 => check::<HmacSha256>(secret, message, signature),
        Algorithm::HS384 => check::<HmacSha384>(secret, message, signature),
        Algorithm::HS512 => check::<HmacSha512>(secret, message, signature),
        other => Err(JwtError::key_mismatch(other, KeyFamily::Hmac)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2
    #[test]
    fn hs256_matches_rfc4231() {
        let tag = sign(Algorithm::HS256, b"Jefe", b"what do ya want for nothing?")
            .expect("HMAC never rejects a key");
        let hex: String = tag.iter().map(|b| format!("{b:02x}")).collect();

        assert_eq!(
            hex,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn truncated_tag_is_rejected() {
        let tag = sign(Algorithm::HS512, b"secret", b"payload").expect("tag");

        assert!(verify(Algorithm::HS512, b"secret", b"payload", &tag).is_ok());
        assert!(matches!(
            verify(Algorithm::HS512, b"secret", b"payload", &tag[..32]),
            Err(JwtError::InvalidSignature)
        ));
    }
}
