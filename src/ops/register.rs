use super::ChallengeFields;
use crate::broker::{CredentialBroker, RegistrationResponse};
use crate::envelope::{
    CredentialInfo, FirstFactorCredential, RegistrationEnvelope, CREDENTIAL_KIND_FIDO2,
};
use crate::error::Result;

/// Repackage a completed registration ceremony into the token-keyed
/// envelope. No cryptography happens here; every field arrives already
/// signed and encoded.
pub fn transcode(response: &RegistrationResponse, token: &str) -> RegistrationEnvelope {
    RegistrationEnvelope {
        temporary_authentication_token: token.to_string(),
        first_factor_credential: FirstFactorCredential {
            credential_kind: CREDENTIAL_KIND_FIDO2,
            credential_info: CredentialInfo {
                cred_id: response.raw_id.clone(),
                attestation_data: response.response.attestation_object.clone(),
                client_data: response.response.client_data_json.clone(),
            },
        },
    }
}

/// Register a passkey: extract the correlation token, run the platform
/// ceremony once, transcode the native response.
pub async fn run<B: CredentialBroker>(
    broker: &B,
    challenge_json: &str,
) -> Result<RegistrationEnvelope> {
    let fields = ChallengeFields::parse(challenge_json)?;
    let token = fields.require_token()?.to_string();

    let response = match broker.create_credential(challenge_json).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.is_retryable(), "Passkey creation ceremony failed");
            return Err(e.into());
        }
    };
    tracing::info!(cred_id = %response.raw_id, "Passkey registered");

    Ok(transcode(&response, &token))
}
