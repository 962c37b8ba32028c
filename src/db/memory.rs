// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Documents are kept as `serde_json::Value`, so anything that round-trips
//! through Firestore also round-trips here. Iteration order within a
//! collection is by document id.

use crate::error::AppError;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

type Collection = BTreeMap<String, Value>;

/// In-memory database client. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    collections: Arc<DashMap<String, Collection>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(None);
        };
        docs.get(id).cloned().map(decode).transpose()
    }

    pub(crate) fn list<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let Some(docs) = self.collections.get(collection) else {
            return Ok(Vec::new());
        };
        docs.values().cloned().map(decode).collect()
    }

    pub(crate) fn insert<T>(&self, collection: &str, id: &str, doc: &T) -> Result<bool, AppError>
    where
        T: Serialize,
    {
        let value = encode(doc)?;
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Ok(false);
        }
        docs.insert(id.to_string(), value);
        Ok(true)
    }

    pub(crate) fn put<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let value = encode(doc)?;
        self.collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), value);
        Ok(())
    }

    pub(crate) fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        if let Some(mut docs) = self.collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }
}

fn encode<T: Serialize>(doc: &T) -> Result<Value, AppError> {
    serde_json::to_value(doc).map_err(|e| AppError::Database(format!("Encode failed: {}", e)))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::Database(format!("Decode failed: {}", e)))
}
