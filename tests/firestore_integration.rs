// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (`FIRESTORE_EMULATOR_HOST`); they are skipped otherwise.

use portfolio_api::db::collections;
use portfolio_api::models::{Project, ProjectInput, RecordId, Skill, SkillInput, User};
use portfolio_api::services::{ProviderProfile, RecordStore, UserDirectory};

mod common;
use common::test_db;

/// Unique identity for test isolation.
fn unique_identity() -> String {
    format!("it-{}", RecordId::new())
}

fn profile(identity: &str, name: &str) -> ProviderProfile {
    ProviderProfile {
        identity: identity.to_string(),
        display_name: name.to_string(),
        emails: vec!["test@example.com".to_string()],
        photos: vec![],
    }
}

#[tokio::test]
async fn test_insert_does_not_overwrite() {
    require_emulator!();

    let db = test_db().await;
    let identity = unique_identity();
    let user = User {
        identity: identity.clone(),
        display_name: "First".to_string(),
        emails: vec![],
        photos: vec![],
        created_at: "2024-01-15T10:00:00.000Z".to_string(),
    };

    assert!(db.insert(collections::USERS, &identity, &user).await.unwrap());

    let second = User {
        display_name: "Second".to_string(),
        ..user.clone()
    };
    assert!(!db.insert(collections::USERS, &identity, &second).await.unwrap());

    let stored: User = db.get(collections::USERS, &identity).await.unwrap().unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn test_find_or_create_is_idempotent() {
    require_emulator!();

    let users = UserDirectory::new(test_db().await);
    let identity = unique_identity();

    let first = users
        .find_or_create(&profile(&identity, "Test User"))
        .await
        .unwrap();
    let again = users
        .find_or_create(&profile(&identity, "Renamed"))
        .await
        .unwrap();

    assert_eq!(first, again);
    assert_eq!(again.display_name, "Test User");
}

#[tokio::test]
async fn test_project_lifecycle() {
    require_emulator!();

    let store: RecordStore<Project> = RecordStore::new(test_db().await);

    let created = store
        .create(ProjectInput {
            title: "Emulator".to_string(),
            description: "Runs against Firestore".to_string(),
            url: "https://example.com/emulator".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(store.get(&created.id).await.unwrap(), created);

    let updated = store
        .update(
            &created.id,
            ProjectInput {
                title: "Emulator 2".to_string(),
                description: "Still Firestore".to_string(),
                url: "https://example.com/emulator2".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(store.get(&created.id).await.unwrap(), updated);
    assert!(store.list().await.unwrap().iter().any(|p| p.id == created.id));

    store.delete(&created.id).await.unwrap();
    assert!(store.get(&created.id).await.is_err());
}

#[tokio::test]
async fn test_skill_round_trips_proficiency() {
    require_emulator!();

    let store: RecordStore<Skill> = RecordStore::new(test_db().await);

    let created = store
        .create(SkillInput {
            name: "Rust".to_string(),
            category: "Language".to_string(),
            proficiency: "Expert".to_string(),
        })
        .await
        .unwrap();

    let fetched = store.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    store.delete(&created.id).await.unwrap();
}
