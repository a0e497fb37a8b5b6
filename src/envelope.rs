//! Wire envelope shapes consumed by the remote verifier. Field names,
//! nesting, and base64 variants are fixed contracts; serialization order
//! follows struct declaration order.

use serde::Serialize;

/// Credential kind tag for every passkey-backed proof.
pub const CREDENTIAL_KIND_FIDO2: &str = "Fido2";

/// Identity + proof bundle for one registration ceremony outcome.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialInfo {
    #[serde(rename = "credId")]
    pub cred_id: String,
    #[serde(rename = "attestationData")]
    pub attestation_data: String,
    #[serde(rename = "clientData")]
    pub client_data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstFactorCredential {
    #[serde(rename = "credentialKind")]
    pub credential_kind: &'static str,
    #[serde(rename = "credentialInfo")]
    pub credential_info: CredentialInfo,
}

/// Standard registration output, keyed by the temporary authentication
/// token.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationEnvelope {
    #[serde(rename = "temporaryAuthenticationToken")]
    pub temporary_authentication_token: String,
    #[serde(rename = "firstFactorCredential")]
    pub first_factor_credential: FirstFactorCredential,
}

/// Additional-device registration output: keyed by challenge identifier,
/// bare credentialInfo, no credentialKind wrapper. A distinct server
/// contract from [`RegistrationEnvelope`], not a variant of it.
#[derive(Debug, Clone, Serialize)]
pub struct AltRegistrationEnvelope {
    #[serde(rename = "challengeIdentifier")]
    pub challenge_identifier: String,
    #[serde(rename = "credentialName")]
    pub credential_name: &'static str,
    #[serde(rename = "credentialInfo")]
    pub credential_info: CredentialInfo,
}

/// Proof fields of a completed assertion ceremony, all base64url as the
/// platform produced them.
#[derive(Debug, Clone, Serialize)]
pub struct CredentialAssertion {
    #[serde(rename = "credId")]
    pub cred_id: String,
    #[serde(rename = "clientData")]
    pub client_data: String,
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String,
    pub signature: String,
    #[serde(rename = "userHandle")]
    pub user_handle: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstFactor {
    pub kind: &'static str,
    #[serde(rename = "credentialAssertion")]
    pub credential_assertion: CredentialAssertion,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignedChallenge {
    #[serde(rename = "challengeIdentifier")]
    pub challenge_identifier: String,
    #[serde(rename = "firstFactor")]
    pub first_factor: FirstFactor,
}

/// Signing/authentication output.
#[derive(Debug, Clone, Serialize)]
pub struct SigningEnvelope {
    #[serde(rename = "signedChallenge")]
    pub signed_challenge: SignedChallenge,
}

/// Recovery key registration output. The encrypted-private-key slot carries
/// a fixed placeholder; at-rest encryption of the key is the caller/server's
/// concern.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryRegistrationEnvelope {
    #[serde(rename = "challengeIdentifier")]
    pub challenge_identifier: String,
    #[serde(rename = "credentialName")]
    pub credential_name: &'static str,
    #[serde(rename = "encryptedPrivateKey")]
    pub encrypted_private_key: &'static str,
    #[serde(rename = "credentialInfo")]
    pub credential_info: CredentialInfo,
}

/// Assertion proof for the software recovery key; no authenticator data
/// because no authenticator was involved.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryAssertion {
    #[serde(rename = "credId")]
    pub cred_id: String,
    #[serde(rename = "clientData")]
    pub client_data: String,
    pub signature: String,
}

/// Recovery completion output; carries the structured challenge back
/// verbatim under `newCredentials`.
#[derive(Debug, Clone, Serialize)]
pub struct RecoveryCompletionEnvelope {
    #[serde(rename = "newCredentials")]
    pub new_credentials: serde_json::Value,
    #[serde(rename = "temporaryAuthenticationToken")]
    pub temporary_authentication_token: String,
    #[serde(rename = "credentialAssertion")]
    pub credential_assertion: RecoveryAssertion,
}
