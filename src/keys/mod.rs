pub mod codec;
pub mod sig;

pub use codec::{generate, KeyAlgorithm, KeyPair, KeyRole};

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("unsupported key algorithm")]
    UnsupportedAlgorithm,
    #[error("malformed key material: {0}")]
    MalformedKeyMaterial(String),
    #[error("signature bytes are not well-formed for SHA256-RSA")]
    InvalidSignatureEncoding,
}
