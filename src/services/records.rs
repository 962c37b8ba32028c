// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CRUD over a record collection.
//!
//! Shared by projects and skills. Every operation checks its inputs in the
//! same order: path id, then payload, then existence.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{RecordId, Resource};
use crate::time_utils::now_rfc3339;
use std::marker::PhantomData;
use validator::Validate;

/// Typed access to the collection holding `R`.
pub struct RecordStore<R> {
    db: Database,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> RecordStore<R> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    /// Every record, in store order.
    pub async fn list(&self) -> Result<Vec<R>> {
        self.db.list(R::COLLECTION).await
    }

    pub async fn get(&self, id: &str) -> Result<R> {
        let id = RecordId::parse(id, R::KIND)?;
        self.fetch(&id).await
    }

    /// Validate `input` and store it under a fresh id.
    pub async fn create(&self, input: R::Input) -> Result<R> {
        Self::check(&input)?;

        let id = RecordId::new();
        let record = R::build(id, input, now_rfc3339())?;

        if !self.db.insert(R::COLLECTION, record.id(), &record).await? {
            // v4 collision
            return Err(AppError::Database(format!(
                "{} id {} already in use",
                R::KIND,
                id
            )));
        }

        tracing::info!(kind = R::KIND, id = %id, "Created record");
        Ok(record)
    }

    /// Replace every client-owned field of an existing record.
    pub async fn update(&self, id: &str, input: R::Input) -> Result<R> {
        let id = RecordId::parse(id, R::KIND)?;
        Self::check(&input)?;

        let mut record = self.fetch(&id).await?;
        record.replace(input, now_rfc3339())?;
        self.db.put(R::COLLECTION, record.id(), &record).await?;

        tracing::info!(kind = R::KIND, id = %id, "Updated record");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = RecordId::parse(id, R::KIND)?;
        self.fetch(&id).await?;
        self.db.delete(R::COLLECTION, &id.to_string()).await?;

        tracing::info!(kind = R::KIND, id = %id, "Deleted record");
        Ok(())
    }

    fn check(input: &R::Input) -> Result<()> {
        input
            .validate()
            .map_err(|e| AppError::validation(R::REQUIREMENTS, &e))
    }

    async fn fetch(&self, id: &RecordId) -> Result<R> {
        self.db
            .get(R::COLLECTION, &id.to_string())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} not found", capitalized(R::KIND))))
    }
}

fn capitalized(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
