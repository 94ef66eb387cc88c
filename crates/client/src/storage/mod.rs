//! Persistent key/value storage for client state.
//!
//! The session token, the cached user and the shopping cart survive
//! restarts by living in a [`LocalStorage`]: plain string values under
//! well-known keys, last write wins.

mod file;
mod memory;
mod token;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use token::{TOKEN_KEY, TokenStorage, USER_KEY};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Key holding the persisted shopping cart.
pub const CART_KEY: &str = "shopping_cart";

/// Errors from reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value is not valid JSON for the expected type.
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be used as a storage name.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// String key/value store that survives restarts.
pub trait LocalStorage: Send + Sync + std::fmt::Debug {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if the value cannot be read or decoded.
pub fn read_json<T: DeserializeOwned>(
    storage: &dyn LocalStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    storage
        .get_item(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode and write a JSON value.
///
/// # Errors
///
/// Returns `StorageError` if the value cannot be encoded or written.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn LocalStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_helpers() {
        let storage = MemoryStorage::new();
        write_json(&storage, "numbers", &[1, 2, 3]).unwrap();

        let numbers: Option<Vec<u32>> = read_json(&storage, "numbers").unwrap();
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        let missing: Option<Vec<u32>> = read_json(&storage, "other").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let storage = MemoryStorage::new();
        storage.set_item("numbers", "[1, 2").unwrap();

        let err = read_json::<Vec<u32>>(&storage, "numbers").unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
    }
}
