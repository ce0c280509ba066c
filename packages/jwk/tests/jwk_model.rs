//! JWK conversions to and from key types

use jose_jwk::{
    Curve, DEFAULT_RSA_BITS, Jwk, JwkSet, KeyAlgorithm, KeyError, KeyParams, PrivateKey,
    PrivateKeyMaterial, generate_private_key, load_private_key,
};
use rsa::BigUint;

#[test]
fn test_rsa_private_jwk_round_trip() {
    let key = generate_private_key(KeyAlgorithm::PS256, DEFAULT_RSA_BITS).expect("RSA key");
    let jwk = Jwk::from_private_key(&key).with_key_id("rsa-1");

    let KeyParams::Rsa(params) = &jwk.params else {
        panic!("expected RSA parameters");
    };
    let p = BigUint::from_bytes_be(params.p.as_deref().expect("p"));
    let q = BigUint::from_bytes_be(params.q.as_deref().expect("q"));
    let qi = BigUint::from_bytes_be(params.qi.as_deref().expect("qi"));
    assert_eq!((qi * &q) % &p, BigUint::from(1u32));

    let restored = jwk.to_private_key().expect("private JWK decodes");
    assert_eq!(restored.public_key(), key.public_key());
    assert_eq!(jwk.to_public_key().expect("public half"), key.public_key());
}

#[test]
fn test_ec_coordinates_are_padded_to_field_size() {
    for (alg, curve) in [
        (KeyAlgorithm::ES256, Curve::P256),
        (KeyAlgorithm::ES384, Curve::P384),
        (KeyAlgorithm::ES512, Curve::P521),
    ] {
        let key = generate_private_key(alg, DEFAULT_RSA_BITS).expect("EC key");
        let jwk = Jwk::from_private_key(&key);

        let KeyParams::Ec(params) = &jwk.params else {
            panic!("expected EC parameters");
        };
        assert_eq!(params.crv, curve.name());
        assert_eq!(params.x.len(), curve.field_size());
        assert_eq!(params.y.len(), curve.field_size());
        assert_eq!(params.d.as_ref().map(Vec::len), Some(curve.field_size()));

        let restored = jwk.to_private_key().expect("private JWK decodes");
        assert_eq!(restored.public_key(), key.public_key());
    }
}

#[test]
fn test_mismatched_ec_private_scalar_is_rejected() {
    let key = generate_private_key(KeyAlgorithm::ES256, DEFAULT_RSA_BITS).expect("EC key");
    let other = generate_private_key(KeyAlgorithm::ES256, DEFAULT_RSA_BITS).expect("EC key");

    let mut jwk = Jwk::from_private_key(&key);
    let KeyParams::Ec(params) = &mut jwk.params else {
        panic!("expected EC parameters");
    };
    let KeyParams::Ec(other_params) = Jwk::from_private_key(&other).params else {
        panic!("expected EC parameters");
    };
    params.d = other_params.d;

    let err = jwk.to_private_key().expect_err("d does not match x/y");
    assert!(matches!(err, KeyError::InvalidParameter { name: "d", .. }));
}

#[test]
fn test_to_public_strips_private_members() {
    let key = generate_private_key(KeyAlgorithm::ES384, DEFAULT_RSA_BITS).expect("EC key");
    let jwk = Jwk::from_private_key(&key)
        .with_key_use("sig")
        .with_algorithm("ES384")
        .with_key_id("ec-1");
    let public = jwk.to_public();

    assert!(jwk.is_private());
    assert!(!public.is_private());
    assert_eq!(public.kid.as_deref(), Some("ec-1"));

    let json = serde_json::to_value(&public).expect("JSON");
    assert_eq!(json["kty"], "EC");
    assert_eq!(json["use"], "sig");
    assert_eq!(json["alg"], "ES384");
    assert!(json.get("d").is_none());
}

#[test]
fn test_generated_set_loads_back() {
    let set: JwkSet = ["a", "b", "a"]
        .into_iter()
        .map(|kid| {
            let key = generate_private_key(KeyAlgorithm::ES256, DEFAULT_RSA_BITS).expect("EC key");
            Jwk::from_private_key(&key).with_key_id(kid)
        })
        .collect();
    let bytes = serde_json::to_vec_pretty(&set).expect("JSON");

    let PrivateKeyMaterial::KeySet(loaded) = load_private_key(&bytes).expect("set loads") else {
        panic!("expected a key set");
    };
    assert_eq!(loaded, set);

    let matches = loaded.lookup_key_id("a");
    assert_eq!(matches.len(), 2);
    assert!(std::ptr::eq(matches[0], &loaded.keys[0]));
    assert!(loaded.lookup_key_id("missing").is_empty());

    let key: PrivateKey = matches[0].to_private_key().expect("member decodes");
    assert_eq!(key.key_type(), "EC");
}

#[test]
fn test_oct_key_has_no_asymmetric_half() {
    let jwk = Jwk::from_secret(b"shared secret");

    assert_eq!(jwk.secret(), Some(&b"shared secret"[..]));
    assert!(matches!(jwk.to_public_key(), Err(KeyError::NotAsymmetric("oct"))));
}
