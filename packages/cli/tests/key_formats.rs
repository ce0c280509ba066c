//! `jwt sign` and `jwt verify` with PEM, DER and Firebase key files

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use pkcs8::{EncodePrivateKey, LineEnding};
use rcgen::{CertificateParams, KeyPair, PKCS_ECDSA_P256_SHA256};
use spki::EncodePublicKey;
use tempfile::TempDir;

const CLAIMS: &str = r#"{"sub":"carol","iat":1700000000}"#;

fn jose_tool() -> Command {
    Command::cargo_bin("jose-tool").expect("jose-tool binary should be built")
}

fn secret_key(byte: u8) -> p256::SecretKey {
    p256::SecretKey::from_slice(&[byte; 32]).expect("valid scalar")
}

fn write(dir: &TempDir, name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// Sign the sample claims with the key file at `key`, returning the token path
fn sign_with(dir: &TempDir, key: &Path, name: &str) -> PathBuf {
    let claims = write(dir, "claims.json", CLAIMS);
    let token = dir.path().join(name);

    jose_tool()
        .args(["jwt", "sign", "-a", "ES256", "-k"])
        .arg(key)
        .arg("-c")
        .arg(&claims)
        .arg("-o")
        .arg(&token)
        .assert()
        .success();
    token
}

fn verify(key: &Path, token: &Path, kid: Option<&str>) -> (String, String) {
    let mut cmd = jose_tool();
    cmd.args(["jwt", "verify", "-a", "ES256", "--todt=false", "-k"])
        .arg(key)
        .arg("-i")
        .arg(token);
    if let Some(kid) = kid {
        cmd.args(["--kid", kid]);
    }
    let output = cmd.output().expect("jose-tool runs");
    assert!(
        output.status.success(),
        "verify failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    (
        String::from_utf8(output.stdout).expect("utf-8 stdout"),
        String::from_utf8(output.stderr).expect("utf-8 stderr"),
    )
}

#[test]
fn test_pkcs8_pem_signs_and_spki_pem_verifies() {
    let dir = TempDir::new().expect("temp dir");
    let key = secret_key(7);
    let private = write(
        &dir,
        "private.pem",
        key.to_pkcs8_pem(LineEnding::LF).expect("PKCS#8 PEM").as_bytes(),
    );
    let public = write(
        &dir,
        "public.pem",
        key.public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI PEM"),
    );

    let token = sign_with(&dir, &private, "token.jwt");
    let (stdout, _) = verify(&public, &token, None);

    assert!(stdout.starts_with("signature OK\n"), "{stdout}");
    assert!(stdout.contains("\"sub\": \"carol\""));
}

#[test]
fn test_sec1_der_signs_and_spki_der_verifies() {
    let dir = TempDir::new().expect("temp dir");
    let key = secret_key(8);
    let private = write(&dir, "private.der", key.to_sec1_der().expect("SEC1 DER").to_vec());
    let public = write(
        &dir,
        "public.der",
        key.public_key().to_public_key_der().expect("SPKI DER").as_bytes(),
    );

    let token = sign_with(&dir, &private, "token.jwt");
    let (stdout, _) = verify(&public, &token, None);

    assert!(stdout.starts_with("signature OK\n"), "{stdout}");
}

#[test]
fn test_firebase_map_selects_by_kid() {
    let dir = TempDir::new().expect("temp dir");

    let cert_key = KeyPair::generate_for(&PKCS_ECDSA_P256_SHA256).expect("P-256 key pair");
    let cert = CertificateParams::new(vec!["jose.test".to_string()])
        .expect("certificate parameters should be valid")
        .self_signed(&cert_key)
        .expect("self-signed certificate should build");
    let spki_key = secret_key(9);

    let document = serde_json::json!({
        "from-cert": cert.pem(),
        "from-spki": spki_key
            .public_key()
            .to_public_key_pem(LineEnding::LF)
            .expect("SPKI PEM"),
    });
    let map = write(
        &dir,
        "firebase.json",
        serde_json::to_vec(&document).expect("JSON"),
    );

    let cert_private = write(&dir, "cert-key.pem", cert_key.serialize_pem());
    let spki_private = write(
        &dir,
        "spki-key.pem",
        spki_key.to_pkcs8_pem(LineEnding::LF).expect("PKCS#8 PEM").as_bytes(),
    );
    let cert_token = sign_with(&dir, &cert_private, "cert.jwt");
    let spki_token = sign_with(&dir, &spki_private, "spki.jwt");

    let (stdout, _) = verify(&map, &spki_token, Some("from-spki"));
    assert!(stdout.starts_with("signature OK\n"), "{stdout}");

    let (stdout, _) = verify(&map, &cert_token, Some("from-cert"));
    assert!(stdout.starts_with("signature OK\n"), "{stdout}");

    // Without --kid the first entry of the map is used
    let (stdout, stderr) = verify(&map, &cert_token, None);
    assert!(stdout.starts_with("signature OK\n"), "{stdout}");
    assert!(stderr.contains("using key set without kid, using the first one"));

    let (stdout, _) = verify(&map, &spki_token, None);
    assert!(stdout.starts_with("signature NOT OK, err: "), "{stdout}");
}

#[test]
fn test_firebase_map_unknown_kid_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let key = secret_key(10);
    let document = serde_json::json!({
        "only": key.public_key().to_public_key_pem(LineEnding::LF).expect("SPKI PEM"),
    });
    let map = write(&dir, "firebase.json", serde_json::to_vec(&document).expect("JSON"));
    let private = write(
        &dir,
        "private.pem",
        key.to_pkcs8_pem(LineEnding::LF).expect("PKCS#8 PEM").as_bytes(),
    );
    let token = sign_with(&dir, &private, "token.jwt");

    jose_tool()
        .args(["jwt", "verify", "-a", "ES256", "--kid", "other", "-k"])
        .arg(&map)
        .arg("-i")
        .arg(&token)
        .assert()
        .failure()
        .code(1)
        .stdout("");
}
