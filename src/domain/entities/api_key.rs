use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};
use crate::domain::value_objects::secret::{KeyDigest, KeyPrefix};
use crate::domain::value_objects::timestamps::Timestamp;
use thiserror::Error;

/// Longest label accepted for a key, in characters.
pub const MAX_KEY_NAME_LEN: usize = 100;

/// An issued API key as stored. Holds no plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyRecord {
    pub id: ApiKeyId,
    pub owner_id: OwnerId,
    pub key_name: String,
    pub digest: KeyDigest,
    pub prefix: KeyPrefix,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl ApiKeyRecord {
    /// Build a freshly issued, active record.
    pub fn issue(
        owner_id: OwnerId,
        key_name: KeyName,
        digest: KeyDigest,
        prefix: KeyPrefix,
    ) -> Self {
        Self {
            id: ApiKeyId::new(),
            owner_id,
            key_name: key_name.into_inner(),
            digest,
            prefix,
            is_active: true,
            created_at: Timestamp::now_utc(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyNameError {
    #[error("key name must not be empty")]
    Empty,
    #[error("key name must be at most {max} characters")]
    TooLong { max: usize },
}

/// A validated, trimmed key label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyName(String);

impl KeyName {
    pub fn parse(raw: &str) -> Result<Self, KeyNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(KeyNameError::Empty);
        }
        if trimmed.chars().count() > MAX_KEY_NAME_LEN {
            return Err(KeyNameError::TooLong {
                max: MAX_KEY_NAME_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_padded_name_when_parse_should_trim() {
        let name = KeyName::parse("  Prod  ").unwrap();
        assert_eq!(name.into_inner(), "Prod");
    }

    #[test]
    fn given_blank_name_when_parse_should_reject_as_empty() {
        assert_eq!(KeyName::parse("   \t"), Err(KeyNameError::Empty));
        assert_eq!(KeyName::parse(""), Err(KeyNameError::Empty));
    }

    #[test]
    fn given_overlong_name_when_parse_should_reject() {
        let raw = "k".repeat(MAX_KEY_NAME_LEN + 1);
        assert_eq!(
            KeyName::parse(&raw),
            Err(KeyNameError::TooLong {
                max: MAX_KEY_NAME_LEN
            })
        );
    }

    #[test]
    fn given_multibyte_name_at_limit_when_parse_should_accept() {
        let raw = "é".repeat(MAX_KEY_NAME_LEN);
        assert!(KeyName::parse(&raw).is_ok());
    }

    #[test]
    fn given_issue_when_called_should_start_active() {
        let record = ApiKeyRecord::issue(
            OwnerId::new(),
            KeyName::parse("Prod").unwrap(),
            KeyDigest::from_hex("ab".repeat(32)),
            KeyPrefix::from_string("wap_abcd".to_string()),
        );

        assert!(record.is_active);
        assert_eq!(record.key_name, "Prod");
        assert_eq!(record.prefix.as_str(), "wap_abcd");
    }
}
