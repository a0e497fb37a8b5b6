use serde::Serialize;

use crate::encoding;

/// Which half of the credential ceremony the client data describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyKind {
    Create,
    Get,
}

impl CeremonyKind {
    pub(crate) fn type_tag(self) -> &'static str {
        match self {
            Self::Create => "key.create",
            Self::Get => "key.get",
        }
    }
}

/// Canonical client-data payload. Field declaration order fixes the JSON
/// key order, which keeps the signed bytes reproducible across runs.
#[derive(Serialize)]
struct ClientData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    challenge: &'a str,
    origin: &'a str,
    #[serde(rename = "crossOrigin")]
    cross_origin: bool,
}

/// Client data for a plain-text challenge; the challenge string is carried
/// verbatim.
pub fn from_text(challenge: &str, origin: &str, kind: CeremonyKind) -> Vec<u8> {
    encode(challenge, origin, kind)
}

/// Client data for a structured challenge. The JSON value is serialized and
/// base64url-encoded (unpadded) so it rides in the string-typed `challenge`
/// field and round-trips exactly.
pub fn from_value(challenge: &serde_json::Value, origin: &str, kind: CeremonyKind) -> Vec<u8> {
    let encoded = encoding::b64url(challenge.to_string());
    encode(&encoded, origin, kind)
}

fn encode(challenge: &str, origin: &str, kind: CeremonyKind) -> Vec<u8> {
    let data = ClientData {
        kind: kind.type_tag(),
        challenge,
        origin,
        cross_origin: false,
    };
    serde_json::to_vec(&data).expect("client data encoding is infallible")
}
