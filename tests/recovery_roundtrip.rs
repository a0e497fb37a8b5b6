use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use keybridge::recovery;
use serde_json::json;

const ORIGIN: &str = "android:apk-key-hash:R4jmqPbXbmjYnheGZ7NGvRSv7-h-FFDMbrrIoXJa6pc";

#[test]
fn test_issue_then_complete_round_trip() {
    let issued = recovery::issue("creation-challenge", "chal-1", ORIGIN).unwrap();
    let cred_id = issued.envelope.credential_info.cred_id.clone();

    let challenge = json!({
        "challengeIdentifier": "chal-2",
        "allowCredentials": {"key": [{"id": cred_id, "type": "public-key"}]},
    });

    // Completing with the PEM handed back by issue must never trip the
    // self-verification check.
    let envelope = recovery::complete(
        &issued.private_key_pem,
        ORIGIN,
        &challenge,
        &cred_id,
        "chal-1",
    )
    .unwrap();

    assert_eq!(envelope.new_credentials, challenge);
    assert_eq!(envelope.temporary_authentication_token, "chal-1");
    assert_eq!(envelope.credential_assertion.cred_id, cred_id);
}

#[test]
fn test_completion_client_data_embeds_challenge() {
    let issued = recovery::issue("c", "id", ORIGIN).unwrap();
    let challenge = json!({"temporaryAuthenticationToken": "tok-9"});

    let envelope =
        recovery::complete(&issued.private_key_pem, ORIGIN, &challenge, "cred-9", "tok-9").unwrap();

    let client_data = URL_SAFE_NO_PAD
        .decode(&envelope.credential_assertion.client_data)
        .unwrap();
    let client_data: serde_json::Value = serde_json::from_slice(&client_data).unwrap();
    assert_eq!(client_data["type"], "key.get");
    assert_eq!(client_data["origin"], ORIGIN);

    // The challenge field is the base64url of the challenge JSON itself.
    let embedded = URL_SAFE_NO_PAD
        .decode(client_data["challenge"].as_str().unwrap())
        .unwrap();
    let embedded: serde_json::Value = serde_json::from_slice(&embedded).unwrap();
    assert_eq!(embedded, challenge);
}

#[test]
fn test_completion_signature_is_base64url_of_rsa_signature() {
    let issued = recovery::issue("c", "id", ORIGIN).unwrap();
    let envelope = recovery::complete(
        &issued.private_key_pem,
        ORIGIN,
        &json!({"a": 1}),
        "cred",
        "tok",
    )
    .unwrap();

    let signature = URL_SAFE_NO_PAD
        .decode(&envelope.credential_assertion.signature)
        .unwrap();
    // RSA-2048 signatures are exactly the modulus size.
    assert_eq!(signature.len(), 256);
}

#[test]
fn test_issue_emits_distinct_keys_and_ids() {
    let first = recovery::issue("c", "id", ORIGIN).unwrap();
    let second = recovery::issue("c", "id", ORIGIN).unwrap();
    assert_ne!(first.private_key_pem, second.private_key_pem);
    assert_ne!(
        first.envelope.credential_info.cred_id,
        second.envelope.credential_info.cred_id
    );
}
