//! `jwk generate` end to end

use std::fs;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

fn jose_tool() -> Command {
    Command::cargo_bin("jose-tool").expect("jose-tool binary should be built")
}

fn read_json(path: &std::path::Path) -> Value {
    let data = fs::read(path).expect("output file should exist");
    serde_json::from_slice(&data).expect("output should be JSON")
}

fn kids(set: &Value) -> Vec<Option<String>> {
    set["keys"]
        .as_array()
        .expect("keys array")
        .iter()
        .map(|jwk| jwk["kid"].as_str().map(ToString::to_string))
        .collect()
}

#[test]
fn test_generate_to_files_splits_private_and_public() {
    let dir = TempDir::new().expect("temp dir");
    let private = dir.path().join("private.json");
    let public = dir.path().join("public.json");

    jose_tool()
        .args(["jwk", "generate", "-a", "ES384", "-n", "2", "-p"])
        .arg(&private)
        .arg("-o")
        .arg(&public)
        .assert()
        .success()
        .stdout("");

    let private = read_json(&private);
    let public = read_json(&public);
    assert_eq!(kids(&private), kids(&public));

    for (private, public) in private["keys"]
        .as_array()
        .expect("keys")
        .iter()
        .zip(public["keys"].as_array().expect("keys"))
    {
        assert_eq!(private["kty"], "EC");
        assert_eq!(private["crv"], "P-384");
        assert_eq!(private["alg"], "ES384");
        assert_eq!(private["use"], "sig");
        assert!(private.get("d").is_some());
        assert!(public.get("d").is_none());
        assert_eq!(private["x"], public["x"]);
    }
}

#[test]
fn test_generate_date_sequence_kids() {
    let dir = TempDir::new().expect("temp dir");
    let private = dir.path().join("private.json");
    let public = dir.path().join("public.json");

    jose_tool()
        .args(["jwk", "generate", "-a", "es256", "-n", "3", "-p"])
        .arg(&private)
        .arg("-o")
        .arg(&public)
        .assert()
        .success();

    let kids = kids(&read_json(&public));
    assert_eq!(kids.len(), 3);
    for (index, kid) in kids.iter().enumerate() {
        let kid = kid.as_deref().expect("every key has a kid");
        let (date, sequence) = kid.rsplit_once(':').expect("date:sequence");
        assert!(
            chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(),
            "{kid} should start with a date"
        );
        assert_eq!(sequence, index.to_string());
    }
}

#[test]
fn test_generate_provided_kids() {
    let dir = TempDir::new().expect("temp dir");
    let public = dir.path().join("public.json");

    jose_tool()
        .args(["jwk", "generate", "-a", "ES256", "-n", "2", "-k", "provided"])
        .args(["--kids", "first,second", "-p", "-", "-o"])
        .arg(&public)
        .assert()
        .success();

    assert_eq!(
        kids(&read_json(&public)),
        [Some("first".to_string()), Some("second".to_string())]
    );
}

#[test]
fn test_generate_provided_kids_count_mismatch() {
    jose_tool()
        .args(["jwk", "generate", "-a", "ES256", "-n", "3", "-k", "provided"])
        .args(["--kids", "a,b"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("error: -n(3) must be == len(--kids)(2)\n");
}

#[test]
fn test_generate_to_stdout_frames_both_sets() {
    let output = jose_tool()
        .args(["jwk", "generate", "-a", "ES256", "-k", "none"])
        .output()
        .expect("jose-tool runs");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let private = stdout
        .strip_prefix("---- Begin private keys ----\n")
        .and_then(|rest| rest.split_once("\n---- End private keys ----\n"))
        .expect("private banner");
    let public = private
        .1
        .strip_prefix("---- Begin public keys ----\n")
        .and_then(|rest| rest.strip_suffix("\n---- End public keys ----\n"))
        .expect("public banner");

    let private: Value = serde_json::from_str(private.0).expect("private JSON");
    let public: Value = serde_json::from_str(public).expect("public JSON");
    assert_eq!(kids(&private), [None]);
    assert!(public["keys"][0].get("d").is_none());
}

#[test]
fn test_generate_rejects_symmetric_and_unknown_algorithms() {
    for alg in ["HS256", "EdDSA"] {
        jose_tool()
            .args(["jwk", "generate", "-a", alg])
            .assert()
            .failure()
            .code(1)
            .stdout("");
    }
}

#[test]
fn test_generate_rejects_zero_keys() {
    jose_tool()
        .args(["jwk", "generate", "-a", "ES256", "-n", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr("error: n must be at least 1\n");
}

#[test]
fn test_generate_rejects_negative_keys() {
    jose_tool()
        .args(["jwk", "generate", "-a", "ES256", "-n", "-1"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("error: n must be at least 1\n");
}

#[test]
fn test_flag_parse_errors_exit_with_one() {
    for args in [
        &["jwt", "sign", "--bogus"][..],
        &["jwk", "generate", "-n", "abc"][..],
        &["jwk", "frobnicate"][..],
    ] {
        jose_tool().args(args).assert().failure().code(1).stdout("");
    }
}

#[test]
fn test_help_exits_with_zero() {
    let output = jose_tool()
        .args(["jwk", "generate", "--help"])
        .output()
        .expect("jose-tool runs");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--kidf"));
}
