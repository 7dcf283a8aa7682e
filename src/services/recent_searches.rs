use std::sync::Arc;

use crate::{
    error::AppResult,
    storage::{get_json, set_json, DurableStorage, StorageKey},
};

pub const MAX_RECENT_SEARCHES: usize = 5;

/// Most-recent-first search history kept in durable storage
pub struct RecentSearches {
    storage: Arc<dyn DurableStorage>,
}

impl RecentSearches {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        Self { storage }
    }

    /// Stored history, newest first; unreadable history counts as empty
    pub fn load(&self) -> Vec<String> {
        match get_json::<Vec<String>>(self.storage.as_ref(), StorageKey::RecentSearches) {
            Ok(searches) => searches.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable search history");
                Vec::new()
            }
        }
    }

    /// Moves `query` to the front of the history, returning the new history.
    /// Blank queries leave the history untouched.
    pub fn record(&self, query: &str) -> AppResult<Vec<String>> {
        let query = query.trim();
        let mut searches = self.load();
        if query.is_empty() {
            return Ok(searches);
        }

        searches.retain(|s| s != query);
        searches.insert(0, query.to_string());
        searches.truncate(MAX_RECENT_SEARCHES);

        set_json(self.storage.as_ref(), StorageKey::RecentSearches, &searches)?;
        Ok(searches)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.storage.remove(StorageKey::RecentSearches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn history() -> (Arc<MemoryStorage>, RecentSearches) {
        let storage = Arc::new(MemoryStorage::new());
        let searches = RecentSearches::new(storage.clone());
        (storage, searches)
    }

    #[test]
    fn test_record_moves_existing_entry_to_front() {
        let (_, searches) = history();
        searches.record("dune").unwrap();
        searches.record("batman").unwrap();
        let result = searches.record("dune").unwrap();

        assert_eq!(result, vec!["dune", "batman"]);
        assert_eq!(searches.load(), result);
    }

    #[test]
    fn test_record_keeps_at_most_five() {
        let (_, searches) = history();
        for query in ["a", "b", "c", "d", "e", "f"] {
            searches.record(query).unwrap();
        }

        assert_eq!(searches.load(), vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn test_blank_query_is_ignored() {
        let (storage, searches) = history();
        assert!(searches.record("   ").unwrap().is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear_removes_key() {
        let (storage, searches) = history();
        searches.record("oppenheimer").unwrap();
        assert_eq!(storage.len(), 1);

        searches.clear().unwrap();
        assert!(storage.is_empty());
        assert!(searches.load().is_empty());
    }

    #[test]
    fn test_unreadable_history_loads_empty() {
        let (storage, searches) = history();
        storage.set(StorageKey::RecentSearches, "not json").unwrap();
        assert!(searches.load().is_empty());
    }
}
