//! ECDSA signatures (ES256, ES384, ES512)
//!
//! JWS carries ECDSA signatures as the fixed-width concatenation `r || s`,
//! not as DER.

use jose_jwk::{PrivateKey, PublicKey};
use p256::ecdsa::signature::{Signer, Verifier};

use crate::algorithms::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::keys::private_family;

pub(super) fn sign(alg: Algorithm, key: &PrivateKey, message: &[u8]) -> JwtResult<Vec<u8>> {
    let signature = match (alg, key) {
        (Algorithm::ES256, PrivateKey::P256(secret)) => {
            let signer = p256::ecdsa::SigningKey::from_slice(&secret.to_bytes())
                .map_err(JwtError::signing)?;
            let signature: p256::ecdsa::Signature =
                signer.try_sign(message).map_err(JwtError::signing)?;
            signature.to_bytes().to_vec()
        }
        (Algorithm::ES384, PrivateKey::P384(secret)) => {
            let signer = p384::ecdsa::SigningKey::from_slice(&secret.to_bytes())
                .map_err(JwtError::signing)?;
            let signature: p384::ecdsa::Signature =
                signer.try_sign(message).map_err(JwtError::signing)?;
            signature.to_bytes().to_vec()
        }
        (Algorithm::ES512, PrivateKey::P521(secret)) => {
            let signer = p521::ecdsa::SigningKey::from_slice(&secret.to_bytes())
                .map_err(JwtError::signing)?;
            let signature: p521::ecdsa::Signature =
                signer.try_sign(message).map_err(JwtError::signing)?;
            signature.to_bytes().to_vec()
        }
        (alg, key) => {
            return Err(JwtError::key_mismatch(alg, private_family(key)));
        }
    };
    Ok(signature)
}

pub(super) fn verify(
    alg: Algorithm,
    key: &PublicKey,
    message: &[u8],
    signature: &[u8],
) -> JwtResult<()> {
    let point = key
        .to_sec1_bytes()
        .ok_or_else(|| JwtError::InvalidKey("not an EC public key".to_string()))?;
    let invalid_key = |err: p256::ecdsa::Error| JwtError::InvalidKey(err.to_string());

    let result = match (alg, key) {
        (Algorithm::ES256, PublicKey::P256(_)) => {
            let verifier = p256::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(invalid_key)?;
            let signature = p256::ecdsa::Signature::from_slice(signature)
                .map_err(|_| JwtError::InvalidSignature)?;
            verifier.verify(message, &signature)
        }
        (Algorithm::ES384, PublicKey::P384(_)) => {
            let verifier = p384::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(invalid_key)?;
            let signature = p384::ecdsa::Signature::from_slice(signature)
                .map_err(|_| JwtError::InvalidSignature)?;
            verifier.verify(message, &signature)
        }
        (Algorithm::ES512, PublicKey::P521(_)) => {
            let verifier = p521::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(invalid_key)?;
            let signature = p521::ecdsa::Signature::from_slice(signature)
                .map_err(|_| JwtError::InvalidSignature)?;
            verifier.verify(message, &signature)
        }
        (alg, _) => {
            return Err(JwtError::InvalidKey(format!(
                "{alg} cannot verify with this key"
            )));
        }
    };
    result.map_err(|_| JwtError::InvalidSignature)
}
