// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (document store).
//!
//! `Database` is created once at startup and cloned into every component
//! that needs storage. Documents are addressed by `(collection, id)`.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryDb;

use crate::config::StoreConfig;
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PROJECTS: &str = "projects";
    pub const SKILLS: &str = "skills";
}

/// Shared document-store handle.
#[derive(Clone)]
pub struct Database {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreDb),
    Memory(MemoryDb),
}

impl Database {
    /// Connect to the configured backend.
    pub async fn connect(store: &StoreConfig) -> Result<Self, AppError> {
        match store {
            StoreConfig::Firestore { project_id } => {
                Ok(Self::from(FirestoreDb::new(project_id).await?))
            }
            StoreConfig::Memory => {
                tracing::warn!("Using in-memory document store; data is lost on restart");
                Ok(Self::from(MemoryDb::new()))
            }
        }
    }

    /// Fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::from(MemoryDb::new())
    }

    /// Fetch one document.
    pub async fn get<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(db) => db.get(collection, id).await,
            Backend::Memory(db) => db.get(collection, id),
        }
    }

    /// Fetch every document in a collection (store order, no pagination).
    pub async fn list<T>(&self, collection: &str) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        match &self.backend {
            Backend::Firestore(db) => db.list(collection).await,
            Backend::Memory(db) => db.list(collection),
        }
    }

    /// Create a document only if `id` is unused.
    ///
    /// Returns `false` (and writes nothing) when the id already exists.
    pub async fn insert<T>(&self, collection: &str, id: &str, doc: &T) -> Result<bool, AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(db) => db.insert(collection, id, doc).await,
            Backend::Memory(db) => db.insert(collection, id, doc),
        }
    }

    /// Create or overwrite a document.
    pub async fn put<T>(&self, collection: &str, id: &str, doc: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        match &self.backend {
            Backend::Firestore(db) => db.put(collection, id, doc).await,
            Backend::Memory(db) => db.put(collection, id, doc),
        }
    }

    /// Remove a document. Deleting a missing id is not an error.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.delete(collection, id).await,
            Backend::Memory(db) => db.delete(collection, id),
        }
    }
}

impl From<FirestoreDb> for Database {
    fn from(db: FirestoreDb) -> Self {
        Self {
            backend: Backend::Firestore(db),
        }
    }
}

impl From<MemoryDb> for Database {
    fn from(db: MemoryDb) -> Self {
        Self {
            backend: Backend::Memory(db),
        }
    }
}
