use credvault::{decrypt, decrypt_with_password, KeyMaterial, StoredCredential, KEY_LEN};

fn test_key() -> KeyMaterial {
    KeyMaterial::from_bytes([9u8; KEY_LEN])
}

#[test]
fn test_legacy_plain_string_passes_through_unchanged() {
    // Credentials stored before encryption at rest existed are plain
    // strings; reads must keep working on them verbatim.
    let stored: StoredCredential =
        serde_json::from_str(r#""legacy-plaintext-password""#).unwrap();
    assert_eq!(
        decrypt(Some(&stored), &test_key()).unwrap(),
        "legacy-plaintext-password"
    );
}

#[test]
fn test_absent_value_resolves_to_empty_string() {
    assert_eq!(decrypt(None, &test_key()).unwrap(), "");
    assert_eq!(decrypt_with_password(None, "any").unwrap(), "");
}

#[test]
fn test_object_missing_required_fields_resolves_to_empty_string() {
    // A record-ish object with fields missing is malformed legacy data:
    // the read degrades to an empty value instead of failing the request.
    let stored: StoredCredential =
        serde_json::from_str(r#"{"enc":"aes-256-gcm","iv":"AAAAAAAAAAAAAAAA"}"#).unwrap();
    assert_eq!(decrypt(Some(&stored), &test_key()).unwrap(), "");
    assert_eq!(decrypt_with_password(Some(&stored), "any").unwrap(), "");
}

#[test]
fn test_unrelated_json_shapes_resolve_to_empty_string() {
    for json in ["42", "null", "[1,2,3]", r#"{"user":"alice"}"#] {
        let stored: StoredCredential = serde_json::from_str(json).unwrap();
        assert_eq!(
            decrypt(Some(&stored), &test_key()).unwrap(),
            "",
            "shape {json} should degrade to empty"
        );
    }
}

#[test]
fn test_legacy_string_passes_through_password_path_too() {
    let stored: StoredCredential = serde_json::from_str(r#""old-value""#).unwrap();
    assert_eq!(
        decrypt_with_password(Some(&stored), "irrelevant").unwrap(),
        "old-value"
    );
}
