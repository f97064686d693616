//! Favorite cities, mirrored to a [`KeyValueStore`].

use cirrus_core::StorageError;

use crate::storage::KeyValueStore;

/// Storage key holding the JSON array of favorite city names
pub const FAVORITES_KEY: &str = "favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Ordered, duplicate-free list of city names.
///
/// Uniqueness is by exact string match, so "Paris" and "paris" are two
/// entries. Every successful [`Favorites::add`] writes the full list back to
/// the store before returning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    cities: Vec<String>,
}

impl Favorites {
    /// Read the list from `store`.
    ///
    /// A missing key, an unreadable store, or a value that is not a JSON
    /// array of strings all yield an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read favorites, starting empty: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(cities) => {
                let mut favorites = Self::default();
                for city in cities {
                    if !favorites.contains(&city) {
                        favorites.cities.push(city);
                    }
                }
                tracing::debug!("Loaded {} favorites", favorites.len());
                favorites
            }
            Err(e) => {
                tracing::warn!("Stored favorites are malformed, starting empty: {}", e);
                Self::default()
            }
        }
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }

    /// Append `city` and persist the whole list.
    ///
    /// On a storage failure the in-memory list is left unchanged.
    pub fn add(
        &mut self,
        city: &str,
        store: &dyn KeyValueStore,
    ) -> Result<AddOutcome, StorageError> {
        if self.contains(city) {
            return Ok(AddOutcome::AlreadyPresent);
        }

        self.cities.push(city.to_string());
        if let Err(e) = self.persist(store) {
            self.cities.pop();
            return Err(e);
        }

        tracing::info!("Added favorite: {}", city);
        Ok(AddOutcome::Added)
    }

    fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.cities)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        store.set(FAVORITES_KEY, &json)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cities.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.cities
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cities.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: "io".to_string(),
            })
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: "read-only".to_string(),
            })
        }
    }

    fn stored(store: &MemoryStore) -> Vec<String> {
        let raw = store.get(FAVORITES_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = MemoryStore::new();
        assert!(Favorites::load(&store).is_empty());
    }

    #[test]
    fn test_load_malformed_is_empty() {
        let store = MemoryStore::new();
        for raw in ["not json", "{\"a\":1}", "[1,2]", "null", ""] {
            store.set(FAVORITES_KEY, raw).unwrap();
            assert!(Favorites::load(&store).is_empty(), "raw {:?}", raw);
        }
    }

    #[test]
    fn test_load_unreadable_store_is_empty() {
        assert!(Favorites::load(&BrokenStore).is_empty());
    }

    #[test]
    fn test_load_preserves_order() {
        let store = MemoryStore::new();
        store
            .set(FAVORITES_KEY, r#"["Oslo","Lima","Cairo"]"#)
            .unwrap();
        let favorites = Favorites::load(&store);
        assert_eq!(favorites.as_slice(), ["Oslo", "Lima", "Cairo"]);
    }

    #[test]
    fn test_add_persists_full_list() {
        let store = MemoryStore::new();
        let mut favorites = Favorites::default();
        assert_eq!(favorites.add("Paris", &store).unwrap(), AddOutcome::Added);
        assert_eq!(favorites.add("Tokyo", &store).unwrap(), AddOutcome::Added);
        assert_eq!(stored(&store), favorites.as_slice());
        assert_eq!(favorites.get(1), Some("Tokyo"));
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let store = MemoryStore::new();
        let mut favorites = Favorites::default();
        favorites.add("Paris", &store).unwrap();
        assert_eq!(
            favorites.add("Paris", &store).unwrap(),
            AddOutcome::AlreadyPresent
        );
        assert_eq!(favorites.len(), 1);
        assert_eq!(stored(&store), vec!["Paris".to_string()]);
    }

    #[test]
    fn test_exact_match_only() {
        let store = MemoryStore::new();
        let mut favorites = Favorites::default();
        favorites.add("Paris", &store).unwrap();
        assert_eq!(favorites.add("paris", &store).unwrap(), AddOutcome::Added);
        assert_eq!(favorites.len(), 2);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut favorites = Favorites::default();
        assert!(favorites.add("Paris", &BrokenStore).is_err());
        assert!(favorites.is_empty());
    }
}
