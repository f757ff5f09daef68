//! Keyed state shared across the server-render / client-hydration boundary.
//!
//! Values are stored as JSON so the whole store can be exported into the page
//! payload on the server and imported again on the client.

use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

/// Shared key/value state.
#[derive(Debug, Default)]
pub struct SharedState {
    values: DashMap<String, Value>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value, deserialized into `T`.
    ///
    /// A stored value that does not deserialize into `T` is treated as absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?.value().clone();
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key = %key, error = %e, "shared state value has unexpected shape");
                None
            }
        }
    }

    /// Set a value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.values.insert(key.to_string(), v);
            }
            Err(e) => warn!(key = %key, error = %e, "failed to serialize shared state value"),
        }
    }

    /// Check if a key is set.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Export every value as a JSON object.
    pub fn to_payload(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        Value::Object(map)
    }

    /// Import values from a payload produced by [`to_payload`](Self::to_payload).
    ///
    /// Non-object payloads are ignored.
    pub fn load_payload(&self, payload: &Value) {
        let Some(map) = payload.as_object() else {
            warn!("ignoring non-object state payload");
            return;
        };
        for (key, value) in map {
            self.values.insert(key.clone(), value.clone());
        }
    }
}
