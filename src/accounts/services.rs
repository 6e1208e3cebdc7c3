use async_trait::async_trait;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::debug;
use uuid::Uuid;

use crate::accounts::email;
use crate::accounts::password;
use crate::accounts::repo::CredentialStore;
use crate::accounts::repo_types::{NewUser, User};

/// Post-verification gate deciding whether a credential-valid user may log
/// in. Deployments can swap the default activation check for their own rule.
pub trait LoginPolicy: Send + Sync {
    /// `Err` carries a reason for the log line only; callers must surface a
    /// uniform "no match" to the client regardless.
    fn check(&self, user: &User) -> Result<(), &'static str>;
}

/// Default policy: allow iff the account is active.
pub struct ActiveUsersOnly;

impl LoginPolicy for ActiveUsersOnly {
    fn check(&self, user: &User) -> Result<(), &'static str> {
        if user.is_active {
            Ok(())
        } else {
            Err("account is inactive")
        }
    }
}

/// One credential-checking backend. Malformed input and credential
/// mismatches are the `Ok(None)` outcome, never an error; `Err` is reserved
/// for persistence failures.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>>;
}

/// Email/password backend against the credential store.
pub struct PasswordAuthenticator {
    users: Arc<dyn CredentialStore>,
    policy: Arc<dyn LoginPolicy>,
}

impl PasswordAuthenticator {
    pub fn new(users: Arc<dyn CredentialStore>) -> Self {
        Self::with_policy(users, Arc::new(ActiveUsersOnly))
    }

    pub fn with_policy(users: Arc<dyn CredentialStore>, policy: Arc<dyn LoginPolicy>) -> Self {
        Self { users, policy }
    }
}

#[async_trait]
impl Authenticator for PasswordAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        if !email::is_valid_email(email.trim()) {
            debug!("login with syntactically invalid email");
            return Ok(None);
        }
        let Some(normalized) = email::normalize_email(email) else {
            return Ok(None);
        };

        let Some(user) = self.users.find_by_email(&normalized).await? else {
            // Burn one hash so a miss costs as much as a failed verify and
            // response timing does not reveal whether the account exists.
            password::dummy_verify(password);
            debug!("login for unknown email");
            return Ok(None);
        };

        if !password::verify_password(password, &user.password_hash)? {
            debug!(user_id = %user.id, "login with wrong password");
            return Ok(None);
        }

        if let Err(reason) = self.policy.check(&user) {
            debug!(user_id = %user.id, reason, "login denied by policy");
            return Ok(None);
        }

        Ok(Some(user))
    }
}

/// Ordered list of authentication backends, tried in sequence. The first
/// backend returning a user wins; persistence errors abort the whole stack.
#[derive(Clone)]
pub struct AuthenticatorStack {
    backends: Arc<Vec<Arc<dyn Authenticator>>>,
}

impl AuthenticatorStack {
    pub fn new(backends: Vec<Arc<dyn Authenticator>>) -> Self {
        Self {
            backends: Arc::new(backends),
        }
    }

    pub async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        for backend in self.backends.iter() {
            if let Some(user) = backend.authenticate(email, password).await? {
                return Ok(Some(user));
            }
        }
        Ok(None)
    }
}

/// User factory: normalize the email, hash the password, persist.
pub async fn create_user(store: &dyn CredentialStore, new: NewUser) -> anyhow::Result<User> {
    let email = new.email.as_deref().and_then(email::normalize_email);
    let password_hash = password::hash_password(&new.password)?;
    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash,
        first_name: new.first_name,
        last_name: new.last_name,
        is_active: true,
        is_staff: new.is_staff,
        is_superuser: new.is_superuser,
        date_joined: OffsetDateTime::now_utc(),
    };
    store.create(user).await
}

/// Like `create_user`, with staff and superuser forced on. The email is
/// mandatory here.
pub async fn create_superuser(
    store: &dyn CredentialStore,
    email: &str,
    password: &str,
) -> anyhow::Result<User> {
    if email.trim().is_empty() {
        anyhow::bail!("superuser requires an email");
    }
    create_user(
        store,
        NewUser {
            email: Some(email.to_string()),
            password: password.to_string(),
            is_staff: true,
            is_superuser: true,
            ..NewUser::default()
        },
    )
    .await
}
