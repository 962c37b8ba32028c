// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User directory: maps provider identities to stored users.

use crate::db::{collections, Database};
use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::google::ProviderProfile;
use crate::time_utils::now_rfc3339;

/// Lookup and first-login registration of users.
#[derive(Clone)]
pub struct UserDirectory {
    db: Database,
}

impl UserDirectory {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Return the user for `profile.identity`, creating it on first login.
    ///
    /// An existing record is returned unchanged even if the provider now
    /// reports a different name or addresses. Concurrent first logins for the
    /// same identity converge on one record: creation is insert-if-absent and
    /// the loser re-reads the winner's document.
    pub async fn find_or_create(&self, profile: &ProviderProfile) -> Result<User> {
        if let Some(existing) = self.get(&profile.identity).await? {
            log_profile_drift(&existing, profile);
            return Ok(existing);
        }

        let user = User {
            identity: profile.identity.clone(),
            display_name: profile.display_name.clone(),
            emails: profile.emails.clone(),
            photos: profile.photos.clone(),
            created_at: now_rfc3339(),
        };

        if self
            .db
            .insert(collections::USERS, &user.identity, &user)
            .await?
        {
            tracing::info!(identity = %user.identity, "Registered new user");
            return Ok(user);
        }

        tracing::debug!(identity = %user.identity, "Lost user creation race, re-reading");
        self.get(&profile.identity).await?.ok_or_else(|| {
            AppError::Database(format!(
                "User {} vanished after conflicting insert",
                profile.identity
            ))
        })
    }

    /// Fetch a user by provider identity.
    pub async fn get(&self, identity: &str) -> Result<Option<User>> {
        self.db.get(collections::USERS, identity).await
    }
}

fn log_profile_drift(existing: &User, profile: &ProviderProfile) {
    if existing.display_name != profile.display_name
        || existing.emails != profile.emails
        || existing.photos != profile.photos
    {
        tracing::info!(
            identity = %existing.identity,
            stored_name = %existing.display_name,
            provider_name = %profile.display_name,
            "Provider profile differs from stored user; keeping stored record"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(identity: &str, name: &str) -> ProviderProfile {
        ProviderProfile {
            identity: identity.to_string(),
            display_name: name.to_string(),
            emails: vec![format!("{identity}@example.com")],
            photos: vec![],
        }
    }

    #[tokio::test]
    async fn test_first_login_creates_user() {
        let users = UserDirectory::new(Database::in_memory());

        let user = users.find_or_create(&profile("g-1", "Ada")).await.unwrap();
        assert_eq!(user.identity, "g-1");
        assert_eq!(user.display_name, "Ada");
        assert_eq!(user.emails, vec!["g-1@example.com".to_string()]);

        let stored = users.get("g-1").await.unwrap().unwrap();
        assert_eq!(stored, user);
    }

    #[tokio::test]
    async fn test_returning_user_keeps_stored_profile() {
        let users = UserDirectory::new(Database::in_memory());

        let first = users.find_or_create(&profile("g-1", "Ada")).await.unwrap();
        let second = users
            .find_or_create(&profile("g-1", "Ada Lovelace"))
            .await
            .unwrap();

        assert_eq!(second, first);
        assert_eq!(second.display_name, "Ada");
    }

    #[tokio::test]
    async fn test_concurrent_first_logins_yield_one_user() {
        let db = Database::in_memory();
        let users = UserDirectory::new(db.clone());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let users = users.clone();
                tokio::spawn(async move {
                    users
                        .find_or_create(&profile("g-race", &format!("Name {i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut created_at = None;
        for handle in handles {
            let user = handle.await.unwrap();
            let first = created_at.get_or_insert_with(|| user.created_at.clone());
            assert_eq!(&user.created_at, first);
        }

        let all: Vec<User> = db.list(collections::USERS).await.unwrap();
        assert_eq!(all.len(), 1);
    }
}
