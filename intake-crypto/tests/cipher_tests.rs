use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use intake_crypto::{
    decrypt, derive_key, encrypt, CryptoError, DerivedKey, KdfParams, NONCE_SIZE, TAG_SIZE,
};
use proptest::prelude::*;

fn key(seed: u8) -> DerivedKey {
    DerivedKey::from_bytes([seed; 32])
}

// ── Round trips ──────────────────────────────────────────────────

#[test]
fn encrypt_decrypt_roundtrip() {
    let k = key(1);
    let token = encrypt(&k, "123-45-6780").unwrap();
    assert_eq!(decrypt(&k, &token).unwrap(), "123-45-6780");
}

#[test]
fn empty_and_non_ascii_roundtrip() {
    let k = key(2);
    for plaintext in ["", "José Ñúñez", "日本語テキスト", "emoji 🔐"] {
        let token = encrypt(&k, plaintext).unwrap();
        assert_eq!(decrypt(&k, &token).unwrap(), plaintext);
    }
}

#[test]
fn tokens_are_url_safe_and_sized() {
    let token = encrypt(&key(3), "abc").unwrap();
    assert!(!token.contains('+') && !token.contains('/'));
    let raw = URL_SAFE.decode(&token).unwrap();
    assert_eq!(raw.len(), 1 + NONCE_SIZE + 3 + TAG_SIZE);
    assert_eq!(raw[0], 1);
}

#[test]
fn same_plaintext_gives_distinct_tokens() {
    let k = key(4);
    let a = encrypt(&k, "same").unwrap();
    let b = encrypt(&k, "same").unwrap();
    assert_ne!(a, b);
}

#[test]
fn derived_keys_interoperate() {
    let params = KdfParams::new(1_000, "intake-core-salt");
    let writer = derive_key("passphrase", &params).unwrap();
    let reader = derive_key("passphrase", &params).unwrap();
    let token = encrypt(&writer, "secret").unwrap();
    assert_eq!(decrypt(&reader, &token).unwrap(), "secret");
}

proptest! {
    #[test]
    fn any_string_roundtrips(plaintext in any::<String>()) {
        let k = key(5);
        let token = encrypt(&k, &plaintext).unwrap();
        prop_assert_eq!(decrypt(&k, &token).unwrap(), plaintext);
    }
}

// ── Failures ─────────────────────────────────────────────────────

#[test]
fn wrong_key_fails() {
    let token = encrypt(&key(6), "secret").unwrap();
    assert!(matches!(decrypt(&key(7), &token), Err(CryptoError::Decryption(_))));
}

#[test]
fn tampered_token_fails() {
    let k = key(8);
    let token = encrypt(&k, "secret").unwrap();
    let mut raw = URL_SAFE.decode(&token).unwrap();
    let last = raw.len() - 1;
    raw[last] ^= 0x01;
    let tampered = URL_SAFE.encode(raw);
    assert!(matches!(decrypt(&k, &tampered), Err(CryptoError::Decryption(_))));
}

#[test]
fn malformed_inputs_fail() {
    let k = key(9);
    assert!(matches!(decrypt(&k, "not base64!!"), Err(CryptoError::Decryption(_))));
    assert!(matches!(
        decrypt(&k, &URL_SAFE.encode([1u8; 10])),
        Err(CryptoError::Decryption(_))
    ));
    assert!(matches!(decrypt(&k, "123-45-6789"), Err(CryptoError::Decryption(_))));
}

#[test]
fn unknown_version_fails() {
    let k = key(10);
    let mut raw = URL_SAFE.decode(encrypt(&k, "x").unwrap()).unwrap();
    raw[0] = 9;
    let err = decrypt(&k, &URL_SAFE.encode(raw)).unwrap_err();
    assert!(err.to_string().contains("unsupported token version 9"));
}
