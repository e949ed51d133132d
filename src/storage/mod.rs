use serde::Serialize;

/// The single durable slot holding the current session.
pub(crate) const USER_KEY: &str = "user";

/// Minimal string key/value store.
///
/// The browser build uses localStorage; tests swap in [`MemoryStorage`].
pub(crate) trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`. Every call is a no-op when storage is unavailable
/// (private mode, sandboxed iframes).
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "localStorage write rejected");
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryStorage {
    items: std::cell::RefCell<std::collections::HashMap<String, String>>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

pub(crate) fn save_json_to_storage<T: Serialize>(store: &impl KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => store.set_item(key, &json),
        Err(e) => tracing::warn!(key, error = %e, "failed to serialize storage value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_json_writes_serialized_value() {
        let store = MemoryStorage::default();
        save_json_to_storage(&store, "k", &vec![1, 2, 3]);
        assert_eq!(store.get_item("k").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn test_remove_item_clears_slot() {
        let store = MemoryStorage::default();
        store.set_item(USER_KEY, "x");
        store.remove_item(USER_KEY);
        assert!(store.get_item(USER_KEY).is_none());
    }
}
