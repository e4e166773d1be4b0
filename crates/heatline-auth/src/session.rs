//! Session management.

use crate::user::UserAccount;
use crate::AuthError;
use heatline_commerce::ids::UserId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from an existing value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        Self(generate_secure_id("sess"))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    /// Session ID.
    pub id: SessionId,
    /// The authenticated user.
    pub user_id: UserId,
    /// Username, for display and cart-by-username calls.
    pub username: String,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last activity.
    pub last_activity_at: i64,
    /// Unix timestamp when session expires.
    pub expires_at: i64,
}

impl AuthSession {
    /// Default session duration: 7 days.
    pub const DEFAULT_DURATION_SECS: i64 = 7 * 24 * 60 * 60;

    /// Create a session for a user.
    pub fn for_user(user: &UserAccount) -> Self {
        let now = current_timestamp();
        Self {
            id: SessionId::generate(),
            user_id: user.id,
            username: user.username.clone(),
            created_at: now,
            last_activity_at: now,
            expires_at: now + Self::DEFAULT_DURATION_SECS,
        }
    }

    /// Create session with custom duration.
    pub fn with_duration(mut self, duration_secs: i64) -> Self {
        self.expires_at = self.created_at + duration_secs;
        self
    }

    /// Check if session is expired.
    pub fn is_expired(&self) -> bool {
        current_timestamp() > self.expires_at
    }

    /// Update last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity_at = current_timestamp();
    }

    /// Extend session expiration.
    pub fn extend(&mut self, duration_secs: i64) {
        self.expires_at = current_timestamp() + duration_secs;
        self.touch();
    }
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session duration in seconds.
    pub duration_secs: i64,
    /// Whether to extend the session on activity.
    pub sliding_expiration: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: AuthSession::DEFAULT_DURATION_SECS,
            sliding_expiration: true,
        }
    }
}

/// In-memory session store and guard.
///
/// `require_user` is the access-denied gate every catalog and cart
/// endpoint sits behind: it yields the authenticated identity that gets
/// passed into the core explicitly.
#[derive(Debug, Clone, Default)]
pub struct MemorySessions {
    inner: Arc<RwLock<HashMap<String, AuthSession>>>,
    config: SessionConfig,
}

impl MemorySessions {
    /// Create a store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a custom configuration.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            inner: Arc::default(),
            config,
        }
    }

    /// Start a session for a verified user.
    pub fn login(&self, user: &UserAccount) -> AuthSession {
        let session = AuthSession::for_user(user).with_duration(self.config.duration_secs);
        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());
        sessions.insert(session.id.as_str().to_string(), session.clone());
        session
    }

    /// Fetch a session by id.
    pub fn get(&self, id: &SessionId) -> Option<AuthSession> {
        let sessions = self.inner.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(id.as_str()).cloned()
    }

    /// Resolve the authenticated user behind a session.
    ///
    /// Missing sessions answer `SessionNotFound`, expired ones
    /// `SessionExpired` (and are dropped). With sliding expiration the
    /// session is extended on each successful check.
    pub fn require_user(&self, id: &SessionId) -> Result<UserId, AuthError> {
        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let session = sessions
            .get_mut(id.as_str())
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired() {
            sessions.remove(id.as_str());
            return Err(AuthError::SessionExpired);
        }

        if self.config.sliding_expiration {
            session.extend(self.config.duration_secs);
        } else {
            session.touch();
        }
        Ok(session.user_id)
    }

    /// End a session. Returns whether one existed.
    pub fn logout(&self, id: &SessionId) -> bool {
        let mut sessions = self.inner.write().unwrap_or_else(|e| e.into_inner());
        sessions.remove(id.as_str()).is_some()
    }
}

/// Generate a random ID with a prefix.
fn generate_secure_id(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}_{:x}_{:x}", prefix, ts, counter)
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::MemoryUsers;

    fn registered_user() -> (MemoryUsers, UserAccount) {
        let users = MemoryUsers::new();
        let user = users.register("john", "john@example.com", "john12345").unwrap();
        (users, user)
    }

    #[test]
    fn test_session_id_generation_is_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_login_then_require_user() {
        let (_, user) = registered_user();
        let sessions = MemorySessions::new();

        let session = sessions.login(&user);
        assert_eq!(sessions.require_user(&session.id).unwrap(), user.id);
    }

    #[test]
    fn test_unknown_session_denied() {
        let sessions = MemorySessions::new();
        let err = sessions.require_user(&SessionId::new("sess_missing")).unwrap_err();
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_expired_session_denied_and_dropped() {
        let (_, user) = registered_user();
        let sessions = MemorySessions::new();

        let session = sessions.login(&user);
        {
            let mut map = sessions.inner.write().unwrap();
            map.get_mut(session.id.as_str()).unwrap().expires_at = 0;
        }

        assert!(matches!(
            sessions.require_user(&session.id),
            Err(AuthError::SessionExpired)
        ));
        // A second check sees no session at all.
        assert!(matches!(
            sessions.require_user(&session.id),
            Err(AuthError::SessionNotFound)
        ));
    }

    #[test]
    fn test_logout() {
        let (_, user) = registered_user();
        let sessions = MemorySessions::new();

        let session = sessions.login(&user);
        assert!(sessions.logout(&session.id));
        assert!(!sessions.logout(&session.id));
        assert!(sessions.require_user(&session.id).is_err());
    }

    #[test]
    fn test_sliding_expiration_extends() {
        let (_, user) = registered_user();
        let sessions = MemorySessions::with_config(SessionConfig {
            duration_secs: 60,
            sliding_expiration: true,
        });

        let session = sessions.login(&user);
        let before = sessions.get(&session.id).unwrap().expires_at;
        sessions.require_user(&session.id).unwrap();
        let after = sessions.get(&session.id).unwrap().expires_at;
        assert!(after >= before);
    }
}
