//! Shared key-value state threaded through a pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::types::document::Document;

/// Mapping from string keys to arbitrary JSON values.
///
/// Owned by the caller. A node reads the keys named by its input
/// expression and writes only its output key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(HashMap<String, Value>);

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Decode the document sequence stored under `key`.
    ///
    /// Returns `None` when the key is absent.
    pub fn documents(&self, key: &str) -> Option<serde_json::Result<Vec<Document>>> {
        self.0
            .get(key)
            .map(|value| Vec::<Document>::deserialize(value))
    }
}

impl From<HashMap<String, Value>> for State {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl From<State> for HashMap<String, Value> {
    fn from(state: State) -> Self {
        state.0
    }
}
