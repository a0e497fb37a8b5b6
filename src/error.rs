/// Crate-wide error. The session passes component errors through unchanged;
/// every failure a caller can observe is one of these categories.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("broker: {0}")]
    Broker(#[from] crate::broker::BrokerError),
    #[error("key material: {0}")]
    Key(#[from] crate::keys::KeyError),
    #[error("missing field `{0}` in challenge")]
    MissingField(&'static str),
    #[error("malformed challenge JSON: {0}")]
    MalformedChallenge(#[from] serde_json::Error),
    #[error("recovery signature failed self-verification against the derived public key")]
    SelfVerificationFailed,
    #[error("session not attached; call attach() first")]
    NotInitialized,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
