use async_trait::async_trait;
use rand::{rngs::OsRng, RngCore};
use sqlx::PgPool;
use std::fmt::Write as _;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::accounts::repo_types::{AuthToken, User};

/// Persistence of user records. Emails passed in are expected to be
/// normalized already (see `email::normalize_email`).
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn create(&self, user: User) -> anyhow::Result<User>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
}

/// Persistence of bearer tokens, one per user.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Return the user's token, creating it on first use. Idempotent:
    /// repeated calls for the same user return the same key.
    async fn get_or_create(&self, user_id: Uuid) -> anyhow::Result<AuthToken>;
    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<AuthToken>>;
}

/// 20 random bytes, hex-encoded: a 40-character opaque token key.
pub(crate) fn generate_key() -> String {
    let mut bytes = [0u8; 20];
    OsRng.fill_bytes(&mut bytes);
    let mut key = String::with_capacity(40);
    for b in bytes {
        let _ = write!(key, "{b:02x}");
    }
    key
}

#[derive(Clone)]
pub struct PgCredentialStore {
    db: PgPool,
}

impl PgCredentialStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name,
                   is_active, is_staff, is_superuser, date_joined
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, last_name,
                   is_active, is_staff, is_superuser, date_joined
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: User) -> anyhow::Result<User> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, last_name,
                               is_active, is_staff, is_superuser, date_joined)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, email, password_hash, first_name, last_name,
                      is_active, is_staff, is_superuser, date_joined
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .bind(user.date_joined)
        .fetch_one(&self.db)
        .await?;
        Ok(created)
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, first_name = $4, last_name = $5,
                is_active = $6, is_staff = $7, is_superuser = $8
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .execute(&self.db)
        .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgTokenStore {
    db: PgPool,
}

impl PgTokenStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenStore for PgTokenStore {
    async fn get_or_create(&self, user_id: Uuid) -> anyhow::Result<AuthToken> {
        // The unique constraint on user_id resolves concurrent first logins:
        // the loser of the race inserts nothing and reads the winner's row.
        let inserted = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (key, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING key, user_id, created_at
            "#,
        )
        .bind(generate_key())
        .bind(user_id)
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(&self.db)
        .await?;

        if let Some(token) = inserted {
            return Ok(token);
        }

        let existing = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT key, user_id, created_at
            FROM auth_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;
        Ok(existing)
    }

    async fn find_by_key(&self, key: &str) -> anyhow::Result<Option<AuthToken>> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT key, user_id, created_at
            FROM auth_tokens
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_40_hex_chars() {
        let key = generate_key();
        assert_eq!(key.len(), 40);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_keys_are_unique() {
        assert_ne!(generate_key(), generate_key());
    }
}
