use rand::RngCore;
use serde::Serialize;

use crate::client_data::{self, CeremonyKind};
use crate::encoding;
use crate::envelope::{CredentialInfo, RecoveryRegistrationEnvelope};
use crate::error::Result;
use crate::keys::{codec, sig, KeyAlgorithm};

/// Display name the server shows for the issued key.
const CREDENTIAL_NAME: &str = "My Recovery Key";

/// Fixed placeholder for the server-side encrypted private key slot; real
/// at-rest encryption is the caller/server's responsibility.
const ENCRYPTED_PRIVATE_KEY_PLACEHOLDER: &str = "124324";

/// Registration envelope plus the only copy of the private key. Custody of
/// the PEM is entirely the caller's from this point on.
#[derive(Debug)]
pub struct IssuedRecoveryKey {
    pub envelope: RecoveryRegistrationEnvelope,
    pub private_key_pem: String,
}

/// Signed payload binding the client-data digest to the new public key.
#[derive(Serialize)]
struct SignaturePayload<'a> {
    #[serde(rename = "clientDataHash")]
    client_data_hash: &'a str,
    #[serde(rename = "publicKey")]
    public_key: &'a str,
}

/// Attestation blob proving the new key signed its own creation challenge.
#[derive(Serialize)]
struct AttestationData<'a> {
    #[serde(rename = "publicKey")]
    public_key: &'a str,
    signature: &'a str,
}

/// Issue a brand-new recovery key: generate, self-attest, wrap for
/// registration. Deterministic given fresh randomness for the key pair and
/// credential id.
pub fn issue(
    challenge: &str,
    challenge_identifier: &str,
    origin: &str,
) -> Result<IssuedRecoveryKey> {
    // 1. Fresh pair; the private half leaves this call only as PEM.
    let pair = codec::generate(KeyAlgorithm::Rsa)?;

    // 2. Client data for the creation ceremony, challenge carried verbatim.
    let client_data = client_data::from_text(challenge, origin, CeremonyKind::Create);

    // 3. Integrity hash over the client data.
    let client_data_hash = sig::sha256_hex(&client_data);

    // 4. Public key PEM rides inside the signed payload.
    let public_key_pem = codec::encode_public_pem(&pair.public)?;

    // 5-6. Sign {clientDataHash, publicKey} with the new private key.
    let payload = serde_json::to_vec(&SignaturePayload {
        client_data_hash: &client_data_hash,
        public_key: &public_key_pem,
    })
    .expect("signature payload encoding is infallible");
    let signature = sig::sign(&payload, &pair.private);
    let signature_hex = encoding::hex(&signature);

    // 7. Attestation blob, base64url over its JSON bytes.
    let attestation = serde_json::to_vec(&AttestationData {
        public_key: &public_key_pem,
        signature: &signature_hex,
    })
    .expect("attestation encoding is infallible");

    // 8. Random 128-bit credential id.
    let mut cred_id = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut cred_id);

    let credential_info = CredentialInfo {
        cred_id: encoding::b64url(cred_id),
        attestation_data: encoding::b64url(&attestation),
        client_data: encoding::b64url(&client_data),
    };

    // 9. Registration envelope plus the private PEM.
    let envelope = RecoveryRegistrationEnvelope {
        challenge_identifier: challenge_identifier.to_string(),
        credential_name: CREDENTIAL_NAME,
        encrypted_private_key: ENCRYPTED_PRIVATE_KEY_PLACEHOLDER,
        credential_info,
    };
    let private_key_pem = codec::encode_private_pem(&pair.private)?;
    tracing::info!(cred_id = %envelope.credential_info.cred_id, "Recovery key issued");

    Ok(IssuedRecoveryKey {
        envelope,
        private_key_pem,
    })
}
