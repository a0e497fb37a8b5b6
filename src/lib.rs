pub mod broker;
pub mod client_data;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod ops;
pub mod origin;
pub mod recovery;
pub mod session;

pub(crate) mod encoding;

pub use broker::{BrokerError, CredentialBroker};
pub use error::{Error, Result};
pub use keys::KeyError;
pub use ops::Operation;
pub use recovery::IssuedRecoveryKey;
pub use session::Session;
