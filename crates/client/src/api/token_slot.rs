//! Per-client bearer token storage

use parking_lot::RwLock;
use serpro_domain::{AccessToken, Result, SerproError};

/// Mutable bearer-token slot owned by one query client.
///
/// Writes replace the whole token under the lock, so a reader sees either the
/// previous token or the new one, never a mix.
#[derive(Debug, Default)]
pub struct TokenSlot {
    token: RwLock<Option<AccessToken>>,
}

impl TokenSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot unconditionally.
    pub fn set(&self, token: AccessToken) {
        *self.token.write() = Some(token);
    }

    /// Whether a token is present.
    pub fn is_set(&self) -> bool {
        self.token.read().is_some()
    }

    /// Copy of the current token.
    ///
    /// # Errors
    /// [`SerproError::NoAccessToken`] while the slot is empty.
    pub fn require(&self) -> Result<AccessToken> {
        self.token.read().clone().ok_or(SerproError::NoAccessToken)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn empty_slot_requires_authentication() {
        let slot = TokenSlot::new();
        assert!(!slot.is_set());
        assert_eq!(slot.require(), Err(SerproError::NoAccessToken));
    }

    #[test]
    fn set_overwrites_previous_token() {
        let slot = TokenSlot::new();
        slot.set(AccessToken::from("first"));
        slot.set(AccessToken::from("second"));
        assert_eq!(slot.require().unwrap().as_str(), "second");
    }

    #[test]
    fn concurrent_readers_only_see_whole_tokens() {
        let slot = Arc::new(TokenSlot::new());
        slot.set(AccessToken::from("aaaaaaaa"));

        let writer = {
            let slot = Arc::clone(&slot);
            std::thread::spawn(move || {
                for i in 0..500 {
                    let token = if i % 2 == 0 { "bbbbbbbb" } else { "aaaaaaaa" };
                    slot.set(AccessToken::from(token));
                }
            })
        };

        for _ in 0..500 {
            let token = slot.require().unwrap();
            assert!(token.as_str() == "aaaaaaaa" || token.as_str() == "bbbbbbbb");
        }
        writer.join().unwrap();
    }
}
