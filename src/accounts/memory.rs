//! In-memory store implementations backing `AppState::fake()` and the test
//! suite. Not wired into any production code path.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::accounts::repo::{generate_key, CredentialStore, TokenStore};
use crate::accounts::repo_types::{AuthToken, User};

#[derive(Default)]
pub struct MemoryCredentialStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().expect("users lock poisoned");
        Ok(users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().expect("users lock poisoned");
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: User) -> anyhow::Result<User> {
        let mut users = self.users.lock().expect("users lock poisoned");
        if let Some(email) = user.email.as_deref() {
            if users.iter().any(|u| u.email.as_deref() == Some(email)) {
                anyhow::bail!("email already taken: {email}");
            }
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        let mut users = self.users.lock().expect("users lock poisoned");
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(())
            }
            None => anyhow::bail!("no such user: {}", user.id),
        }
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<Uuid, AuthToken>>,
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get_or_create(&self, user_id: Uuid) -> anyhow::Result<AuthToken> {
        let mut tokens = self.tokens.lock().expect("tokens lock poisoned");
        let token = tokens.entry(user_id).or_insert_with(|| AuthToken {
            key: generate_key(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(token.clone())
    }

    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<AuthToken>> {
        let tokens = self.tokens.lock().expect("tokens lock poisoned");
        Ok(tokens.values().find(|t| t.key == key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_get_or_create_is_idempotent() {
        let store = MemoryTokenStore::default();
        let user_id = Uuid::new_v4();
        let first = store.get_or_create(user_id).await.expect("create");
        let second = store.get_or_create(user_id).await.expect("get");
        assert_eq!(first.key, second.key);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryCredentialStore::default();
        let user = User {
            id: Uuid::new_v4(),
            email: Some("me@example.com".into()),
            password_hash: "x".into(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            date_joined: OffsetDateTime::now_utc(),
        };
        store.create(user.clone()).await.expect("first insert");
        let mut dup = user;
        dup.id = Uuid::new_v4();
        assert!(store.create(dup).await.is_err());
    }
}
