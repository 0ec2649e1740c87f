use nexus::storage::{StorageBackend, StorageError};

/// Browser `localStorage`. Off the browser every read misses and writes are
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, _key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        if let Some(storage) = local_storage() {
            return storage.get_item(_key).ok().flatten();
        }
        None
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = local_storage()
                .ok_or_else(|| StorageError("localStorage unavailable".to_string()))?;
            storage
                .set_item(_key, _value)
                .map_err(|e| StorageError(format!("{e:?}")))?;
        }
        Ok(())
    }

    fn remove_item(&self, _key: &str) {
        #[cfg(target_arch = "wasm32")]
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(_key);
        }
    }
}
