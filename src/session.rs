use std::sync::{Arc, RwLock};

use crate::broker::CredentialBroker;
use crate::envelope::{
    AltRegistrationEnvelope, RecoveryCompletionEnvelope, RegistrationEnvelope, SigningEnvelope,
};
use crate::error::{Error, Result};
use crate::ops::{self, Operation};
use crate::origin;
use crate::recovery::{self, IssuedRecoveryKey};

/// Process-wide entry point. Constructed once and passed by reference;
/// holds the broker handle and the deployment origin behind a lock so the
/// host can re-attach when its execution context is recreated.
pub struct Session<B> {
    state: RwLock<Option<SessionState<B>>>,
}

struct SessionState<B> {
    broker: Arc<B>,
    origin: String,
}

impl<B: CredentialBroker> Session<B> {
    /// An unattached session; every operation fails with `NotInitialized`
    /// until [`Session::attach`] runs.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(None),
        }
    }

    /// A session attached in one step.
    pub fn with_context(broker: B, signing_cert_der: &[u8]) -> Self {
        let session = Self::new();
        session.attach(broker, signing_cert_der);
        session
    }

    /// Bind (or re-bind) the execution context: the broker handle and the
    /// signing certificate the origin identifier derives from.
    pub fn attach(&self, broker: B, signing_cert_der: &[u8]) {
        let origin = origin::from_signing_certificate(signing_cert_der);
        tracing::info!(%origin, "Session attached");
        *self.state.write().unwrap() = Some(SessionState {
            broker: Arc::new(broker),
            origin,
        });
    }

    pub fn is_attached(&self) -> bool {
        self.state.read().unwrap().is_some()
    }

    /// The deployment's origin identifier.
    pub fn origin(&self) -> Result<String> {
        Ok(self.snapshot()?.1)
    }

    /// Per-call snapshot of the attached state, taken out of the lock so
    /// nothing is held across the broker await and concurrent invocations
    /// cannot interfere.
    fn snapshot(&self) -> Result<(Arc<B>, String)> {
        let guard = self.state.read().unwrap();
        let state = guard.as_ref().ok_or(Error::NotInitialized)?;
        Ok((Arc::clone(&state.broker), state.origin.clone()))
    }

    /// Register a passkey (token-keyed envelope). One platform ceremony.
    pub async fn register_passkey(&self, challenge_json: &str) -> Result<RegistrationEnvelope> {
        let (broker, _) = self.snapshot()?;
        ops::register::run(broker.as_ref(), challenge_json).await
    }

    /// Register a passkey on an additional device (identifier-keyed shape).
    pub async fn register_passkey_alternate(
        &self,
        challenge_json: &str,
    ) -> Result<AltRegistrationEnvelope> {
        let (broker, _) = self.snapshot()?;
        ops::register_alt::run(broker.as_ref(), challenge_json).await
    }

    /// Sign a server challenge with an existing passkey.
    pub async fn sign_challenge(&self, challenge_json: &str) -> Result<SigningEnvelope> {
        let (broker, _) = self.snapshot()?;
        ops::sign::run(broker.as_ref(), challenge_json).await
    }

    /// Dispatch any passkey operation and return its envelope as JSON.
    pub async fn perform(
        &self,
        operation: Operation,
        challenge_json: &str,
    ) -> Result<serde_json::Value> {
        Ok(match operation {
            Operation::Register => to_value(self.register_passkey(challenge_json).await?),
            Operation::RegisterAlternate => {
                to_value(self.register_passkey_alternate(challenge_json).await?)
            }
            Operation::Sign => to_value(self.sign_challenge(challenge_json).await?),
        })
    }

    /// Issue a brand-new recovery key. No platform ceremony; the returned
    /// PEM is the only copy of the private key.
    pub fn create_recovery_key(
        &self,
        challenge: &str,
        challenge_identifier: &str,
    ) -> Result<IssuedRecoveryKey> {
        let (_, origin) = self.snapshot()?;
        recovery::issue(challenge, challenge_identifier, &origin)
    }

    /// Complete account recovery with a previously issued private key PEM.
    pub fn recover_from_private_key(
        &self,
        private_key_pem: &str,
        challenge: &serde_json::Value,
        cred_id: &str,
        challenge_identifier: &str,
    ) -> Result<RecoveryCompletionEnvelope> {
        let (_, origin) = self.snapshot()?;
        recovery::complete(private_key_pem, &origin, challenge, cred_id, challenge_identifier)
    }
}

impl<B: CredentialBroker> Default for Session<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_value<T: serde::Serialize>(envelope: T) -> serde_json::Value {
    serde_json::to_value(envelope).expect("envelope encoding is infallible")
}
