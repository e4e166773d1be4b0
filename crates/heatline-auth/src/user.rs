//! User accounts.

use crate::password::PasswordHasher;
use crate::AuthError;
use heatline_commerce::ids::UserId;
use heatline_commerce::store::UserLookup;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

/// A registered user.
///
/// `password_hash` serializes as `password`, matching the persisted row
/// and the sign-up response, which both carry the hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserAccount {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name, unique.
    pub username: String,
    /// Email address, unique.
    pub email: String,
    /// Argon2 hash of the password.
    #[serde(rename = "password")]
    pub password_hash: String,
    /// Unix timestamp of creation.
    #[serde(rename = "createdAt")]
    pub created_at: i64,
    /// Unix timestamp of last update.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// In-memory user registry.
///
/// Clones share the same accounts. Implements the commerce crate's
/// `UserLookup` so the cart ledger can verify identities without knowing
/// anything else about authentication.
#[derive(Debug, Clone, Default)]
pub struct MemoryUsers {
    inner: Arc<UsersInner>,
}

#[derive(Debug, Default)]
struct UsersInner {
    rows: RwLock<Vec<UserAccount>>,
    next_id: AtomicI64,
}

impl MemoryUsers {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user, hashing the password.
    ///
    /// Fails with `UserAlreadyExists` when the username or email is
    /// already taken.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserAccount, AuthError> {
        let password_hash = PasswordHasher::new().hash(password)?;
        let now = current_timestamp();

        let mut rows = self.inner.rows.write().unwrap_or_else(|e| e.into_inner());
        if rows
            .iter()
            .any(|u| u.username == username || u.email == email)
        {
            return Err(AuthError::UserAlreadyExists(username.to_string()));
        }

        let user = UserAccount {
            id: UserId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1),
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());
        Ok(user)
    }

    /// Look up a user by id.
    pub fn find(&self, id: UserId) -> Option<UserAccount> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        rows.iter().find(|u| u.id == id).cloned()
    }

    /// Look up a user by username.
    pub fn find_by_username(&self, username: &str) -> Option<UserAccount> {
        let rows = self.inner.rows.read().unwrap_or_else(|e| e.into_inner());
        rows.iter().find(|u| u.username == username).cloned()
    }

    /// Check a username/password pair.
    ///
    /// Unknown usernames and wrong passwords both answer
    /// `InvalidCredentials`, so callers cannot probe which usernames
    /// exist.
    pub fn verify_login(&self, username: &str, password: &str) -> Result<UserAccount, AuthError> {
        let user = self
            .find_by_username(username)
            .ok_or(AuthError::InvalidCredentials)?;
        if PasswordHasher::new().verify(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

impl UserLookup for MemoryUsers {
    fn contains(&self, id: UserId) -> bool {
        self.find(id).is_some()
    }

    fn resolve(&self, username: &str) -> Option<UserId> {
        self.find_by_username(username).map(|u| u.id)
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
