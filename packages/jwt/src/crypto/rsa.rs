//! RSA signatures: RSASSA-PKCS1-v1_5 (RS*) and RSASSA-PSS (PS*)
//!
//! PSS uses MGF1 with the message digest and a salt as long as the digest.

use rand_core::OsRng;
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey, pkcs1v15, pss};

use crate::algorithms::{Algorithm, KeyFamily};
use crate::error::{JwtError, JwtResult};

pub(super) fn sign(alg: Algorithm, key: &RsaPrivateKey, message: &[u8]) -> JwtResult<Vec<u8>> {
    let key = key.clone();
    let mut rng = OsRng;
    let signature = match alg {
        Algorithm::RS256 => pkcs1v15::SigningKey::<Sha256>::new(key)
            .try_sign(message)
            .map(|sig: pkcs1v15::Signature| sig.to_vec()),
        Algorithm::RS384 => pkcs1v15::SigningKey::<Sha384>::new(key)
            .try_sign(message)
            .map(|sig: pkcs1v15::Signature| sig.to_vec()),
        Algorithm::RS512 => pkcs1v15::SigningKey::<Sha512>::new(key)
            .try_sign(message)
            .map(|sig: pkcs1v15::Signature| sig.to_vec()),
        Algorithm::PS256 => pss::SigningKey::<Sha256>::new(key)
            .try_sign_with_rng(&mut rng, message)
            .map(|sig: pss::Signature| sig.to_vec()),
        Algorithm::PS384 => pss::SigningKey::<Sha384>::new(key)
            .try_sign_with_rng(&mut rng, message)
            .map(|sig: pss::Signature| sig.to_vec()),
        Algorithm::PS512 => pss::SigningKey::<Sha512>::new(key)
            .try_sign_with_rng(&mut rng, message)
            .map(|sig: pss::Signature| sig.to_vec()),
        other => return Err(JwtError::key_mismatch(other, KeyFamily::Rsa)),
    };
    signature.map_err(JwtError::signing)
}

pub(super) fn verify(
    alg: Algorithm,
    key: &RsaPublicKey,
    message: &[u8],
    signature: &[u8],
) -> JwtResult<()> {
    let key = key.clone();
    let result = match alg {
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
            let signature = pkcs1v15::Signature::try_from(signature)
                .map_err(|_| JwtError::InvalidSignature)?;
            match alg {
                Algorithm::RS256 => {
                    pkcs1v15::VerifyingKey::<Sha256>::new(key).verify(message, &signature)
                }
                Algorithm::RS384 => {
                    pkcs1v15::VerifyingKey::<Sha384>::new(key).verify(message, &signature)
                }
                _ => pkcs1v15::VerifyingKey::<Sha512>::new(key).verify(message, &signature),
            }
        }
        Algorithm::PS256 | Algorithm::PS384 | Algorithm::PS512 => {
            let signature =
                pss::Signature::try_from(signature).map_err(|_| JwtError::InvalidSignature)?;
            match alg {
                Algorithm::PS256 => pss::VerifyingKey::<Sha256>::new(key).verify(message, &signature),
                Algorithm::PS384 => pss::VerifyingKey::<Sha384>::new(key).verify(message, &signature),
                _ => pss::VerifyingKey::<Sha512>::new(key).verify(message, &signature),
            }
        }
        other => return Err(JwtError::key_mismatch(other, KeyFamily::Rsa)),
    };
    result.map_err(|_| JwtError::InvalidSignature)
}
