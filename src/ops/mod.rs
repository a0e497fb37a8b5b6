pub mod register;
pub mod register_alt;
pub mod sign;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Passkey ceremony selector for [`crate::Session::perform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    RegisterAlternate,
    Sign,
}

/// Correlation fields a caller-supplied challenge may carry. This typed
/// boundary is the only place "field absent" becomes an error.
#[derive(Debug, Deserialize)]
pub(crate) struct ChallengeFields {
    #[serde(rename = "temporaryAuthenticationToken")]
    temporary_authentication_token: Option<String>,
    #[serde(rename = "challengeIdentifier")]
    challenge_identifier: Option<String>,
}

impl ChallengeFields {
    pub fn parse(challenge_json: &str) -> Result<Self> {
        Ok(serde_json::from_str(challenge_json)?)
    }

    pub fn require_token(&self) -> Result<&str> {
        self.temporary_authentication_token
            .as_deref()
            .ok_or(Error::MissingField("temporaryAuthenticationToken"))
    }

    pub fn require_challenge_identifier(&self) -> Result<&str> {
        self.challenge_identifier
            .as_deref()
            .ok_or(Error::MissingField("challengeIdentifier"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_both_fields() {
        let fields = ChallengeFields::parse(
            r#"{"temporaryAuthenticationToken":"tok-1","challengeIdentifier":"chal-1","rp":{"id":"example.com"}}"#,
        )
        .unwrap();
        assert_eq!(fields.require_token().unwrap(), "tok-1");
        assert_eq!(fields.require_challenge_identifier().unwrap(), "chal-1");
    }

    #[test]
    fn test_missing_fields_are_typed_errors() {
        let fields = ChallengeFields::parse(r#"{"challenge":"abc"}"#).unwrap();
        assert!(matches!(
            fields.require_token().unwrap_err(),
            Error::MissingField("temporaryAuthenticationToken")
        ));
        assert!(matches!(
            fields.require_challenge_identifier().unwrap_err(),
            Error::MissingField("challengeIdentifier")
        ));
    }

    #[test]
    fn test_non_object_challenge_is_malformed() {
        assert!(matches!(
            ChallengeFields::parse("[1,2,3]").unwrap_err(),
            Error::MalformedChallenge(_)
        ));
    }
}
