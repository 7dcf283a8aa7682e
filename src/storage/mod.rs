use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Namespace prepended to every durable key
pub const STORAGE_PREFIX: &str = "cineai";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Token,
    RefreshToken,
    User,
    RecentSearches,
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StorageKey::Token => "token",
            StorageKey::RefreshToken => "refresh_token",
            StorageKey::User => "user",
            StorageKey::RecentSearches => "recent_searches",
        };
        write!(f, "{}_{}", STORAGE_PREFIX, name)
    }
}

/// Key/value storage that survives process restarts
///
/// Values are plain strings; structured values go through [`get_json`] and
/// [`set_json`].
pub trait DurableStorage: Send + Sync {
    fn get(&self, key: StorageKey) -> AppResult<Option<String>>;

    fn set(&self, key: StorageKey, value: &str) -> AppResult<()>;

    fn remove(&self, key: StorageKey) -> AppResult<()>;
}

/// Reads and deserializes a JSON value stored under `key`
pub fn get_json<T: DeserializeOwned>(
    storage: &dyn DurableStorage,
    key: StorageKey,
) -> AppResult<Option<T>> {
    match storage.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Serializes `value` as JSON and stores it under `key`
pub fn set_json<T: Serialize>(
    storage: &dyn DurableStorage,
    key: StorageKey,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_display_is_namespaced() {
        assert_eq!(StorageKey::Token.to_string(), "cineai_token");
        assert_eq!(StorageKey::RefreshToken.to_string(), "cineai_refresh_token");
        assert_eq!(StorageKey::User.to_string(), "cineai_user");
        assert_eq!(
            StorageKey::RecentSearches.to_string(),
            "cineai_recent_searches"
        );
    }

    #[test]
    fn test_json_helpers() {
        let storage = MemoryStorage::new();
        set_json(&storage, StorageKey::RecentSearches, &vec!["dune", "batman"]).unwrap();

        let raw = storage.get(StorageKey::RecentSearches).unwrap();
        assert_eq!(raw.as_deref(), Some(r#"["dune","batman"]"#));

        let value: Option<Vec<String>> = get_json(&storage, StorageKey::RecentSearches).unwrap();
        assert_eq!(value, Some(vec!["dune".to_string(), "batman".to_string()]));
    }

    #[test]
    fn test_get_json_rejects_corrupt_value() {
        let storage = MemoryStorage::new();
        storage.set(StorageKey::User, "{not json").unwrap();

        let result: AppResult<Option<Vec<String>>> = get_json(&storage, StorageKey::User);
        assert!(result.is_err());
    }
}
