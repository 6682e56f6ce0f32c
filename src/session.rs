//! Session-only key/value store
//!
//! Values live for the lifetime of the process and are never written to disk.
//! The theme manager publishes a flattened copy of the active theme here so
//! other components can read it without a handle to the manager, and hosts
//! put per-session overrides such as `ui.scale` here.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    values: Map<String, Value>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, value = %value, "Session value set");
        self.values.insert(key, value);
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Typed lookup; `None` when absent or of another type
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Typed lookup with a fallback
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Insert every entry of `map`, replacing existing keys
    pub fn extend(&mut self, map: Map<String, Value>) {
        self.values.extend(map);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_lookup() {
        let mut store = SessionStore::new();
        store.set("ui.scale", 1.5);
        store.set("label", "hi");

        assert_eq!(store.get::<f32>("ui.scale"), Some(1.5));
        assert_eq!(store.get::<f32>("label"), None);
        assert_eq!(store.get_or("missing", 1.0f32), 1.0);
        assert_eq!(store.get::<String>("label").as_deref(), Some("hi"));
    }

    #[test]
    fn test_extend_replaces_keys() {
        let mut store = SessionStore::new();
        store.set("name", "old");

        let mut map = Map::new();
        map.insert("name".to_string(), Value::from("new"));
        map.insert("layout".to_string(), Value::from(1));
        store.extend(map);

        assert_eq!(store.len(), 2);
        assert_eq!(store.get::<String>("name").as_deref(), Some("new"));
        assert_eq!(store.remove("layout"), Some(Value::from(1)));
        assert_eq!(store.get_raw("layout"), None);
    }
}
