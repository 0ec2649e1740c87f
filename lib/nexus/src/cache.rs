use std::rc::Rc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::StorageBackend;

pub const AUTH_TOKEN_KEY: &str = "auth_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";
/// Namespace of the versioned blob holding the session's persisted subset.
pub const SESSION_STORAGE_KEY: &str = "auth-storage";

#[derive(Serialize, Deserialize)]
struct Versioned<T> {
    state: T,
    version: u32,
}

/// Typed JSON view over a [`StorageBackend`].
///
/// Reads never fail: a missing or malformed entry is simply absent. Writes
/// that the backend rejects are logged and dropped.
#[derive(Clone)]
pub struct PersistentCache {
    backend: Rc<dyn StorageBackend>,
}

impl PersistentCache {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get_item(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Ignoring malformed cache entry '{}': {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialize cache entry '{}': {}", key, e);
                return;
            }
        };
        if let Err(e) = self.backend.set_item(key, &json) {
            warn!("Could not write cache entry '{}': {}", key, e);
        }
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove_item(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.backend.get_item(key).is_some()
    }

    /// Reads a `{ "state": ..., "version": n }` blob, ignoring other versions.
    pub fn get_versioned<T: DeserializeOwned>(&self, key: &str, version: u32) -> Option<T> {
        let blob: Versioned<T> = self.get(key)?;
        if blob.version != version {
            debug!(
                "Discarding '{}' blob with version {} (expected {})",
                key, blob.version, version
            );
            return None;
        }
        Some(blob.state)
    }

    pub fn set_versioned<T: Serialize>(&self, key: &str, version: u32, state: &T) {
        self.set(key, &Versioned { state, version });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn cache() -> (MemoryStorage, PersistentCache) {
        let storage = MemoryStorage::new();
        (storage.clone(), PersistentCache::new(Rc::new(storage)))
    }

    #[test]
    fn values_round_trip_as_json() {
        let (storage, cache) = cache();
        cache.set(AUTH_TOKEN_KEY, "tok1");

        assert_eq!(storage.get_item(AUTH_TOKEN_KEY).as_deref(), Some("\"tok1\""));
        assert_eq!(cache.get::<String>(AUTH_TOKEN_KEY).as_deref(), Some("tok1"));

        cache.remove(AUTH_TOKEN_KEY);
        assert!(!cache.contains(AUTH_TOKEN_KEY));
    }

    #[test]
    fn malformed_or_missing_entries_are_absent() {
        let (storage, cache) = cache();
        storage.set_item(USER_KEY, "{not json").unwrap();

        assert_eq!(cache.get::<serde_json::Value>(USER_KEY), None);
        assert_eq!(cache.get::<String>("missing"), None);
    }

    #[test]
    fn versioned_blob_rejects_other_versions() {
        let (_, cache) = cache();
        cache.set_versioned(SESSION_STORAGE_KEY, 0, &vec![1, 2, 3]);

        assert_eq!(
            cache.get_versioned::<Vec<u8>>(SESSION_STORAGE_KEY, 0),
            Some(vec![1, 2, 3])
        );
        assert_eq!(cache.get_versioned::<Vec<u8>>(SESSION_STORAGE_KEY, 1), None);
    }
}
