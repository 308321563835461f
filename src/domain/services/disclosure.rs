//! Per-session reveal state for the one plaintext key a session may hold.
//!
//! A session holds at most the most recently created key. Creating another
//! key replaces the slot, and `dismiss` wipes it; records whose plaintext is
//! not in the slot can only ever be shown masked.

use crate::domain::entities::api_key::ApiKeyRecord;
use crate::domain::value_objects::ids::{ApiKeyId, OwnerId};
use crate::domain::value_objects::secret::{KeyPrefix, PlaintextSecret};
use thiserror::Error;

/// Mask characters appended to the prefix. Fixed, unrelated to the key length.
pub const MASK_LEN: usize = 24;
pub const MASK_CHAR: char = '•';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureState {
    Empty,
    Hidden,
    Revealed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisclosureError {
    #[error("no plaintext is held for this key")]
    NothingToReveal,
}

struct HeldKey {
    key_id: ApiKeyId,
    owner_id: OwnerId,
    secret: PlaintextSecret,
}

enum Slot {
    Empty,
    Hidden(HeldKey),
    Revealed(HeldKey),
}

pub struct DisclosureController {
    slot: Slot,
}

impl Default for DisclosureController {
    fn default() -> Self {
        Self::new()
    }
}

impl DisclosureController {
    pub fn new() -> Self {
        Self { slot: Slot::Empty }
    }

    pub fn state(&self) -> DisclosureState {
        match self.slot {
            Slot::Empty => DisclosureState::Empty,
            Slot::Hidden(_) => DisclosureState::Hidden,
            Slot::Revealed(_) => DisclosureState::Revealed,
        }
    }

    /// Id of the key whose plaintext is still held, if any.
    pub fn held_key_id(&self) -> Option<ApiKeyId> {
        self.held().map(|held| held.key_id)
    }

    /// Take ownership of a just-created key. Any previously held plaintext is dropped.
    pub fn hold(&mut self, record: &ApiKeyRecord, secret: PlaintextSecret) {
        self.slot = Slot::Hidden(HeldKey {
            key_id: record.id,
            owner_id: record.owner_id,
            secret,
        });
    }

    /// Show the held plaintext. Only the held key, for its owner, can be revealed.
    pub fn reveal(
        &mut self,
        owner_id: OwnerId,
        key_id: ApiKeyId,
    ) -> Result<&PlaintextSecret, DisclosureError> {
        if !self.holds_for(owner_id, key_id) {
            return Err(DisclosureError::NothingToReveal);
        }

        self.slot = match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Hidden(held) | Slot::Revealed(held) => Slot::Revealed(held),
            Slot::Empty => Slot::Empty,
        };

        match &self.slot {
            Slot::Revealed(held) => Ok(&held.secret),
            _ => Err(DisclosureError::NothingToReveal),
        }
    }

    /// Stop showing the plaintext but keep holding it. Same checks as `reveal`.
    pub fn hide(&mut self, owner_id: OwnerId, key_id: ApiKeyId) -> Result<(), DisclosureError> {
        if !self.holds_for(owner_id, key_id) {
            return Err(DisclosureError::NothingToReveal);
        }
        self.slot = match std::mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Hidden(held) | Slot::Revealed(held) => Slot::Hidden(held),
            Slot::Empty => Slot::Empty,
        };
        Ok(())
    }

    /// Drop the held plaintext for good if it belongs to `owner_id`.
    /// Returns the id of the discarded key; any other slot is left alone.
    pub fn dismiss(&mut self, owner_id: OwnerId) -> Option<ApiKeyId> {
        let held = self.held().filter(|held| held.owner_id == owner_id)?.key_id;
        self.slot = Slot::Empty;
        Some(held)
    }

    /// Drop the held plaintext if it belongs to `key_id` (the record is gone).
    pub fn forget(&mut self, key_id: ApiKeyId) {
        if self.held_key_id() == Some(key_id) {
            self.slot = Slot::Empty;
        }
    }

    /// The text to show for `record`: the plaintext only while this session
    /// holds it and it is revealed, otherwise the masked prefix.
    pub fn display(&self, record: &ApiKeyRecord) -> String {
        match &self.slot {
            Slot::Revealed(held) if held.key_id == record.id => held.secret.expose().to_string(),
            _ => masked(&record.prefix),
        }
    }

    fn holds_for(&self, owner_id: OwnerId, key_id: ApiKeyId) -> bool {
        self.held()
            .is_some_and(|held| held.key_id == key_id && held.owner_id == owner_id)
    }

    fn held(&self) -> Option<&HeldKey> {
        match &self.slot {
            Slot::Empty => None,
            Slot::Hidden(held) | Slot::Revealed(held) => Some(held),
        }
    }
}

/// Prefix followed by a fixed run of mask characters.
pub fn masked(prefix: &KeyPrefix) -> String {
    let mut out = String::with_capacity(prefix.as_str().len() + MASK_LEN * MASK_CHAR.len_utf8());
    out.push_str(prefix.as_str());
    out.extend(std::iter::repeat(MASK_CHAR).take(MASK_LEN));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::api_key::KeyName;
    use crate::domain::services::key_digest::{digest, prefix_of};
    use crate::domain::services::secret_generator::{OsSecretGenerator, SecretGenerator};

    fn issue(owner_id: OwnerId) -> (ApiKeyRecord, PlaintextSecret) {
        let secret = OsSecretGenerator.generate().unwrap();
        let record = ApiKeyRecord::issue(
            owner_id,
            KeyName::parse("Prod").unwrap(),
            digest(&secret),
            prefix_of(&secret),
        );
        (record, secret)
    }

    #[test]
    fn given_new_controller_should_be_empty_and_refuse_reveal() {
        let mut controller = DisclosureController::new();

        assert_eq!(controller.state(), DisclosureState::Empty);
        assert_eq!(
            controller.reveal(OwnerId::new(), ApiKeyId::new()).err(),
            Some(DisclosureError::NothingToReveal)
        );
    }

    #[test]
    fn given_held_key_when_reveal_then_dismiss_should_not_reveal_again() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let plaintext = secret.expose().to_string();
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);
        assert_eq!(controller.state(), DisclosureState::Hidden);

        let revealed = controller.reveal(owner, record.id).unwrap().expose().to_string();
        assert_eq!(revealed, plaintext);
        assert_eq!(controller.state(), DisclosureState::Revealed);

        assert_eq!(controller.dismiss(owner), Some(record.id));
        assert_eq!(controller.dismiss(owner), None);

        assert_eq!(controller.state(), DisclosureState::Empty);
        assert!(controller.reveal(owner, record.id).is_err());
        assert_ne!(controller.display(&record), plaintext);
    }

    #[test]
    fn given_revealed_key_when_revealed_again_should_return_same_plaintext() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);

        let first = controller.reveal(owner, record.id).unwrap().expose().to_string();
        let second = controller.reveal(owner, record.id).unwrap().expose().to_string();

        assert_eq!(first, second);
    }

    #[test]
    fn given_second_hold_when_reveal_first_should_fail() {
        let owner = OwnerId::new();
        let (first, first_secret) = issue(owner);
        let (second, second_secret) = issue(owner);
        let mut controller = DisclosureController::new();

        controller.hold(&first, first_secret);
        controller.hold(&second, second_secret);

        assert_eq!(controller.held_key_id(), Some(second.id));
        assert!(controller.reveal(owner, first.id).is_err());
        assert!(controller.reveal(owner, second.id).is_ok());
    }

    #[test]
    fn given_other_owner_when_reveal_should_fail() {
        let (record, secret) = issue(OwnerId::new());
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);

        assert!(controller.reveal(OwnerId::new(), record.id).is_err());
        assert_eq!(controller.state(), DisclosureState::Hidden);
    }

    #[test]
    fn given_revealed_key_when_hide_should_keep_holding_and_mask() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);
        controller.reveal(owner, record.id).unwrap();

        controller.hide(owner, record.id).unwrap();

        assert_eq!(controller.state(), DisclosureState::Hidden);
        assert_eq!(controller.display(&record), masked(&record.prefix));
        assert!(controller.reveal(owner, record.id).is_ok());
    }

    #[test]
    fn given_revealed_key_when_display_should_show_plaintext_only_for_that_record() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let (other, _) = issue(owner);
        let plaintext = secret.expose().to_string();
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);
        controller.reveal(owner, record.id).unwrap();

        assert_eq!(controller.display(&record), plaintext);
        assert_eq!(controller.display(&other), masked(&other.prefix));
    }

    #[test]
    fn given_forget_for_held_key_should_empty_slot_and_ignore_others() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);

        controller.forget(ApiKeyId::new());
        assert_eq!(controller.state(), DisclosureState::Hidden);

        controller.forget(record.id);
        assert_eq!(controller.state(), DisclosureState::Empty);
    }

    #[test]
    fn given_prefix_when_masked_should_append_fixed_mask() {
        let (record, _) = issue(OwnerId::new());

        let shown = masked(&record.prefix);

        assert!(shown.starts_with(record.prefix.as_str()));
        assert_eq!(shown.chars().count(), record.prefix.as_str().len() + MASK_LEN);
        assert!(shown.chars().skip(record.prefix.as_str().len()).all(|c| c == MASK_CHAR));
    }

    #[test]
    fn given_foreign_owner_when_dismiss_should_leave_slot_hidden() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);

        assert_eq!(controller.dismiss(OwnerId::new()), None);

        assert_eq!(controller.state(), DisclosureState::Hidden);
        assert!(controller.reveal(owner, record.id).is_ok());
    }

    #[test]
    fn given_revealed_key_when_hide_with_wrong_owner_or_id_should_stay_revealed() {
        let owner = OwnerId::new();
        let (record, secret) = issue(owner);
        let mut controller = DisclosureController::new();
        controller.hold(&record, secret);
        controller.reveal(owner, record.id).unwrap();

        assert_eq!(
            controller.hide(OwnerId::new(), record.id),
            Err(DisclosureError::NothingToReveal)
        );
        assert_eq!(
            controller.hide(owner, ApiKeyId::new()),
            Err(DisclosureError::NothingToReveal)
        );
        assert_eq!(controller.state(), DisclosureState::Revealed);
    }
}
