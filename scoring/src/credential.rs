//! API key for the completion service, checked before any outbound call.

use thiserror::Error;

const KEY_PREFIX: &str = "sk-";
const MIN_KEY_LEN: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("OpenAI API key is not configured")]
    Missing,
    #[error("OpenAI API key is malformed (expected `sk-` prefix and at least 20 characters)")]
    Malformed,
}

/// A syntactically plausible API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trims the raw value and checks presence, prefix and length.
    pub fn parse(raw: Option<&str>) -> Result<Self, CredentialError> {
        let key = raw.map(str::trim).unwrap_or_default();
        if key.is_empty() {
            return Err(CredentialError::Missing);
        }
        if !key.starts_with(KEY_PREFIX) || key.chars().count() < MIN_KEY_LEN {
            return Err(CredentialError::Malformed);
        }
        Ok(Self(key.to_string()))
    }

    /// The secret, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiKey({}…, len={})", KEY_PREFIX, self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_blank_keys_are_missing() {
        assert_eq!(ApiKey::parse(None), Err(CredentialError::Missing));
        assert_eq!(ApiKey::parse(Some("   ")), Err(CredentialError::Missing));
    }

    #[test]
    fn wrong_prefix_or_short_key_is_malformed() {
        assert_eq!(
            ApiKey::parse(Some("pk-0123456789abcdefghij")),
            Err(CredentialError::Malformed)
        );
        assert_eq!(ApiKey::parse(Some("sk-short")), Err(CredentialError::Malformed));
    }

    #[test]
    fn valid_key_is_trimmed() {
        let key = ApiKey::parse(Some("  sk-0123456789abcdefghij\n")).unwrap();
        assert_eq!(key.expose(), "sk-0123456789abcdefghij");
        assert_eq!(key.len(), 23);
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = ApiKey::parse(Some("sk-0123456789abcdefghij")).unwrap();
        let s = format!("{:?}", key);
        assert!(!s.contains("0123456789"), "debug output leaked the key: {}", s);
    }
}
