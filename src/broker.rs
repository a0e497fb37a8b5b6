use async_trait::async_trait;
use serde::Deserialize;

/// How a platform ceremony failed, categorized so the caller can drive
/// retry policy without string matching. The transcoders never retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokerError {
    #[error("user cancelled the ceremony")]
    UserCancelled,
    #[error("ceremony interrupted")]
    Interrupted,
    #[error("credential provider is misconfigured")]
    ProviderMisconfigured,
    #[error("domain validation failed: {0}")]
    DomainValidationFailed(String),
    #[error("ceremony failed: {0}")]
    Unknown(String),
}

impl BrokerError {
    /// Whether the caller may re-invoke the operation. Cancellation must
    /// never be auto-retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

/// Typed projection of the platform's native registration result.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationResponse {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    #[serde(rename = "authenticatorAttachment")]
    pub authenticator_attachment: Option<String>,
    #[serde(rename = "clientExtensionResults")]
    pub client_extension_results: Option<ClientExtensionResults>,
    pub response: AttestationResponse,
    #[serde(rename = "type")]
    pub credential_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttestationResponse {
    #[serde(rename = "attestationObject")]
    pub attestation_object: String,
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: Option<String>,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    #[serde(rename = "publicKey")]
    pub public_key: Option<String>,
    #[serde(rename = "publicKeyAlgorithm")]
    pub public_key_algorithm: Option<i64>,
    #[serde(default)]
    pub transports: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientExtensionResults {
    #[serde(rename = "credProps")]
    pub cred_props: Option<CredProps>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CredProps {
    pub rk: Option<bool>,
}

/// Typed projection of the platform's native assertion result.
#[derive(Debug, Clone, Deserialize)]
pub struct AssertionResponse {
    pub id: String,
    #[serde(rename = "rawId")]
    pub raw_id: String,
    #[serde(rename = "authenticatorAttachment")]
    pub authenticator_attachment: Option<String>,
    pub response: AssertionData,
    #[serde(rename = "type")]
    pub credential_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssertionData {
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
    #[serde(rename = "userHandle")]
    pub user_handle: String,
}

impl RegistrationResponse {
    /// Parse the platform's native registration JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl AssertionResponse {
    /// Parse the platform's native assertion JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Narrow capability onto the platform credential ceremony. Implementations
/// suspend for as long as the provider UI is up; cancellation follows the
/// platform's own contract, not this crate's.
#[async_trait]
pub trait CredentialBroker: Send + Sync {
    /// Run the creation ceremony for the server-supplied request JSON.
    async fn create_credential(
        &self,
        request_json: &str,
    ) -> Result<RegistrationResponse, BrokerError>;

    /// Run the assertion ceremony for the server-supplied request JSON.
    async fn get_credential(&self, request_json: &str) -> Result<AssertionResponse, BrokerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- native response parsing ----

    #[test]
    fn test_registration_response_parses_platform_json() {
        let json = r#"{
            "authenticatorAttachment": "platform",
            "clientExtensionResults": {"credProps": {"rk": true}},
            "id": "KEDetxZcUfinhVi6Za418IT0-gg",
            "rawId": "KEDetxZcUfinhVi6Za418IT0-gg",
            "response": {
                "attestationObject": "o2NmbXRkbm9uZQ",
                "authenticatorData": "SZYN5YgOjGh0NBcP",
                "clientDataJSON": "eyJ0eXBlIjoid2ViYXV0aG4uY3JlYXRlIn0",
                "publicKey": "MIIBIjANBgkqhkiG9w0BAQ",
                "publicKeyAlgorithm": -257,
                "transports": ["internal", "hybrid"]
            },
            "type": "public-key"
        }"#;
        let response = RegistrationResponse::from_json(json).unwrap();
        assert_eq!(response.raw_id, "KEDetxZcUfinhVi6Za418IT0-gg");
        assert_eq!(response.response.attestation_object, "o2NmbXRkbm9uZQ");
        assert_eq!(response.response.public_key_algorithm, Some(-257));
        assert_eq!(response.response.transports, vec!["internal", "hybrid"]);
        assert_eq!(
            response.client_extension_results.unwrap().cred_props.unwrap().rk,
            Some(true)
        );
    }

    #[test]
    fn test_registration_response_requires_client_data() {
        let json = r#"{
            "id": "a", "rawId": "a", "type": "public-key",
            "response": {"attestationObject": "b"}
        }"#;
        assert!(RegistrationResponse::from_json(json).is_err());
    }

    #[test]
    fn test_assertion_response_parses_platform_json() {
        let json = r#"{
            "id": "KEDetxZcUfinhVi6Za418IT0-gg",
            "rawId": "KEDetxZcUfinhVi6Za418IT0-gg",
            "response": {
                "authenticatorData": "SZYN5YgOjGh0NBcP",
                "clientDataJSON": "eyJ0eXBlIjoid2ViYXV0aG4uZ2V0In0",
                "signature": "MEUCIQD8nq",
                "userHandle": "dXNlci0x"
            },
            "type": "public-key"
        }"#;
        let response = AssertionResponse::from_json(json).unwrap();
        assert_eq!(response.response.signature, "MEUCIQD8nq");
        assert_eq!(response.response.user_handle, "dXNlci0x");
    }

    // ---- failure categories ----

    #[test]
    fn test_only_interruption_is_retryable() {
        assert!(BrokerError::Interrupted.is_retryable());
        assert!(!BrokerError::UserCancelled.is_retryable());
        assert!(!BrokerError::ProviderMisconfigured.is_retryable());
        assert!(!BrokerError::DomainValidationFailed("rp mismatch".into()).is_retryable());
        assert!(!BrokerError::Unknown("3rd party SDK".into()).is_retryable());
    }
}
