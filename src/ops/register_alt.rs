use super::ChallengeFields;
use crate::broker::{CredentialBroker, RegistrationResponse};
use crate::envelope::{AltRegistrationEnvelope, CredentialInfo};
use crate::error::Result;

/// Display name the server shows for a key registered on an additional
/// device.
const CREDENTIAL_NAME: &str = "Second key";

/// Repackage a completed registration ceremony into the identifier-keyed
/// shape. The correlation token still comes from the challenge's
/// `temporaryAuthenticationToken` field but is emitted as
/// `challengeIdentifier`; the two registration shapes must not be
/// conflated.
pub fn transcode(response: &RegistrationResponse, challenge_identifier: &str) -> AltRegistrationEnvelope {
    AltRegistrationEnvelope {
        challenge_identifier: challenge_identifier.to_string(),
        credential_name: CREDENTIAL_NAME,
        credential_info: CredentialInfo {
            cred_id: response.raw_id.clone(),
            attestation_data: response.response.attestation_object.clone(),
            client_data: response.response.client_data_json.clone(),
        },
    }
}

/// Register a passkey on a new device: same ceremony as the standard
/// registration, different wire shape.
pub async fn run<B: CredentialBroker>(
    broker: &B,
    challenge_json: &str,
) -> Result<AltRegistrationEnvelope> {
    let fields = ChallengeFields::parse(challenge_json)?;
    let challenge_identifier = fields.require_token()?.to_string();

    let response = match broker.create_credential(challenge_json).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.is_retryable(), "Passkey creation ceremony failed");
            return Err(e.into());
        }
    };
    tracing::info!(cred_id = %response.raw_id, "Passkey registered on additional device");

    Ok(transcode(&response, &challenge_identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::AttestationResponse;

    #[test]
    fn test_transcode_keys_by_challenge_identifier() {
        let response = RegistrationResponse {
            id: "id-2".into(),
            raw_id: "id-2".into(),
            authenticator_attachment: None,
            client_extension_results: None,
            response: AttestationResponse {
                attestation_object: "att".into(),
                authenticator_data: None,
                client_data_json: "cd".into(),
                public_key: None,
                public_key_algorithm: None,
                transports: vec![],
            },
            credential_type: "public-key".into(),
        };
        let envelope = transcode(&response, "tok-as-identifier");
        assert_eq!(envelope.challenge_identifier, "tok-as-identifier");
        assert_eq!(envelope.credential_name, "Second key");
        assert_eq!(envelope.credential_info.cred_id, "id-2");

        // No credentialKind wrapper in this shape.
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("firstFactorCredential").is_none());
        assert!(json["credentialInfo"].get("credentialKind").is_none());
    }
}
