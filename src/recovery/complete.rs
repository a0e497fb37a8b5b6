use crate::client_data::{self, CeremonyKind};
use crate::encoding;
use crate::envelope::{RecoveryAssertion, RecoveryCompletionEnvelope};
use crate::error::{Error, Result};
use crate::keys::{codec, sig, KeyRole};

/// Complete account recovery: rebuild the private key from its PEM, sign
/// the structured challenge, and wrap the proof for the verifier.
pub fn complete(
    private_key_pem: &str,
    origin: &str,
    challenge: &serde_json::Value,
    cred_id: &str,
    challenge_identifier: &str,
) -> Result<RecoveryCompletionEnvelope> {
    // 1. Reconstruct the private key.
    let der = codec::decode_pem(private_key_pem, KeyRole::Private)?;
    let private = codec::private_key_from_der(&der)?;

    // 2. Client data carries the structured challenge base64url-encoded.
    let client_data = client_data::from_value(challenge, origin, CeremonyKind::Get);

    // 3. Sign the client data.
    let signature = sig::sign(&client_data, &private);

    // 4. Self-check against the CRT-derived public half. A mismatch means a
    //    corrupted key or an implementation bug; the signature must not
    //    reach the wire.
    let public = codec::derive_public_key(&private);
    let verified = sig::verify(&client_data, &signature, &public)?;
    tracing::debug!(verified, "Recovery signature self-check");
    if !verified {
        return Err(Error::SelfVerificationFailed);
    }

    // 5. Completion envelope; the challenge rides back verbatim.
    Ok(RecoveryCompletionEnvelope {
        new_credentials: challenge.clone(),
        temporary_authentication_token: challenge_identifier.to_string(),
        credential_assertion: RecoveryAssertion {
            cred_id: cred_id.to_string(),
            client_data: encoding::b64url(&client_data),
            signature: encoding::b64url(&signature),
        },
    })
}
