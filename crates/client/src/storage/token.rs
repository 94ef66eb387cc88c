//! Session token and cached user on top of [`LocalStorage`].

use std::sync::Arc;

use boutique_core::User;
use secrecy::{ExposeSecret, SecretString};
use tracing::error;

use super::{LocalStorage, read_json, write_json};

/// Key holding the session token.
pub const TOKEN_KEY: &str = "auth_token";
/// Key holding the JSON-encoded current user.
pub const USER_KEY: &str = "current_user";

/// Session token and cached user, persisted in local storage.
///
/// Every operation is best-effort: storage failures are logged and reads
/// fall back to `None`, so a broken store degrades to "logged out".
#[derive(Debug, Clone)]
pub struct TokenStorage {
    storage: Arc<dyn LocalStorage>,
}

impl TokenStorage {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// The stored session token.
    #[must_use]
    pub fn get_token(&self) -> Option<SecretString> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SecretString::from),
            Err(e) => {
                error!(error = %e, "Failed to read auth token");
                None
            }
        }
    }

    /// Persist the session token.
    pub fn set_token(&self, token: &SecretString) {
        if let Err(e) = self.storage.set_item(TOKEN_KEY, token.expose_secret()) {
            error!(error = %e, "Failed to store auth token");
        }
    }

    /// Forget the session token.
    pub fn remove_token(&self) {
        if let Err(e) = self.storage.remove_item(TOKEN_KEY) {
            error!(error = %e, "Failed to remove auth token");
        }
    }

    /// The cached user, if present and readable.
    #[must_use]
    pub fn get_user(&self) -> Option<User> {
        read_json(self.storage.as_ref(), USER_KEY).unwrap_or_else(|e| {
            error!(error = %e, "Failed to read cached user");
            None
        })
    }

    /// Cache the current user.
    pub fn set_user(&self, user: &User) {
        if let Err(e) = write_json(self.storage.as_ref(), USER_KEY, user) {
            error!(error = %e, "Failed to store current user");
        }
    }

    /// Forget the cached user.
    pub fn remove_user(&self) {
        if let Err(e) = self.storage.remove_item(USER_KEY) {
            error!(error = %e, "Failed to remove current user");
        }
    }

    /// Forget token and user.
    pub fn clear(&self) {
        self.remove_token();
        self.remove_user();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::{Email, UserId};

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn user() -> User {
        User {
            id: UserId::new("user-uuid-001"),
            email: Email::parse("john.doe@example.com").unwrap(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[derive(Debug)]
    struct BrokenStorage;

    impl LocalStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn test_token_and_user_round_trip() {
        let backend = MemoryStorage::new();
        let tokens = TokenStorage::new(Arc::new(backend.clone()));

        tokens.set_token(&SecretString::from("mock-jwt-token-user-uuid-001-1".to_string()));
        tokens.set_user(&user());

        assert_eq!(
            tokens.get_token().unwrap().expose_secret(),
            "mock-jwt-token-user-uuid-001-1"
        );
        assert_eq!(tokens.get_user(), Some(user()));

        tokens.clear();
        assert!(tokens.get_token().is_none());
        assert!(tokens.get_user().is_none());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_corrupt_user_reads_as_none() {
        let backend = MemoryStorage::new();
        backend.set_item(USER_KEY, "{not json").unwrap();

        let tokens = TokenStorage::new(Arc::new(backend));
        assert!(tokens.get_user().is_none());
    }

    #[test]
    fn test_failures_are_swallowed() {
        let tokens = TokenStorage::new(Arc::new(BrokenStorage));

        tokens.set_token(&SecretString::from("abc".to_string()));
        tokens.set_user(&user());
        tokens.clear();

        assert!(tokens.get_token().is_none());
        assert!(tokens.get_user().is_none());
    }
}
