use super::ChallengeFields;
use crate::broker::{AssertionResponse, CredentialBroker};
use crate::envelope::{
    CredentialAssertion, FirstFactor, SignedChallenge, SigningEnvelope, CREDENTIAL_KIND_FIDO2,
};
use crate::error::Result;

/// Repackage a completed assertion ceremony under
/// `signedChallenge.firstFactor.credentialAssertion`.
pub fn transcode(response: &AssertionResponse, challenge_identifier: &str) -> SigningEnvelope {
    SigningEnvelope {
        signed_challenge: SignedChallenge {
            challenge_identifier: challenge_identifier.to_string(),
            first_factor: FirstFactor {
                kind: CREDENTIAL_KIND_FIDO2,
                credential_assertion: CredentialAssertion {
                    cred_id: response.raw_id.clone(),
                    client_data: response.response.client_data_json.clone(),
                    authenticator_data: response.response.authenticator_data.clone(),
                    signature: response.response.signature.clone(),
                    user_handle: response.response.user_handle.clone(),
                },
            },
        },
    }
}

/// Sign a server challenge with an existing passkey.
pub async fn run<B: CredentialBroker>(broker: &B, challenge_json: &str) -> Result<SigningEnvelope> {
    let fields = ChallengeFields::parse(challenge_json)?;
    let challenge_identifier = fields.require_challenge_identifier()?.to_string();

    let response = match broker.get_credential(challenge_json).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(error = %e, retryable = e.is_retryable(), "Passkey assertion ceremony failed");
            return Err(e.into());
        }
    };
    tracing::info!(cred_id = %response.raw_id, "Challenge signed with passkey");

    Ok(transcode(&response, &challenge_identifier))
}
