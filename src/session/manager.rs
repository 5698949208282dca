//! Session lifecycle
//!
//! [`SessionManager`] is the only writer of the credential store. It logs in
//! through an [`AuthApi`], answers "is anyone logged in?" from the store and
//! the clock on every call, and tears the session down when a token expires
//! or the server rejects it. Teardown is announced on a broadcast channel as
//! a [`SessionEvent`]; whoever hosts the session (the CLI, a UI) subscribes
//! and navigates to the login route.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use tokio::sync::broadcast;

use super::clock::{Clock, SystemClock};
use super::store::{CredentialStore, Credentials, StorageKey};
use super::token;
use crate::client::api::AuthApi;
use crate::client::models::LoginRequest;
use crate::error::{ApiError, AuthError, Result};
use crate::router::names;

const EVENT_CAPACITY: usize = 16;

/// Session transitions that require the host to navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user asked to log out.
    LoggedOut,
    /// The token expired locally or the server answered 401.
    Expired,
}

impl SessionEvent {
    /// Route the host must land on, by name.
    pub fn redirect_target(self) -> &'static str {
        names::LOGIN
    }
}

/// Identity fields as currently stored.
///
/// Each field is read on its own; a display name may be present while the
/// token is not. Check [`SessionManager::is_logged_in`] before trusting it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    pub token: Option<String>,
    pub subject_id: Option<String>,
    pub display_name: Option<String>,
}

pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    auth: Arc<dyn AuthApi>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>, auth: Arc<dyn AuthApi>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            auth,
            clock: Arc::new(SystemClock),
            events,
        }
    }

    /// Replace the time source used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Exchange credentials for a token and persist the session.
    ///
    /// # Errors
    /// [`AuthError`] when the server rejects the credentials, returns no
    /// token, or cannot be reached. Store failures are passed through.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool> {
        debug!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.auth.authenticate(&request).await?;

        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.store.set(&Credentials {
            token,
            subject_id: response.subject_id,
            display_name: response.name,
        })?;

        info!("Logged in as {}", username);
        Ok(true)
    }

    /// Whether a non-expired token is stored right now.
    pub fn is_logged_in(&self) -> bool {
        match self.read(StorageKey::Token) {
            Some(token) => !token::is_expired_at(&token, self.clock.now()),
            None => false,
        }
    }

    /// Clear the session and announce [`SessionEvent::LoggedOut`].
    ///
    /// Always emits, even when nothing was stored.
    pub fn logout(&self) {
        self.clear_store();
        info!("Logged out");
        self.emit(SessionEvent::LoggedOut);
    }

    /// Tear the session down after `token` expired or drew a 401.
    ///
    /// Only acts while `token` is still the stored one, so a late response
    /// to an earlier session never ends a newer login, and concurrent
    /// failures on one session tear it down once. Returns whether this call
    /// performed the teardown.
    pub fn expire_token(&self, token: &str) -> bool {
        match self.store.clear_if_token(token) {
            Ok(true) => {
                warn!("Session expired, cleared stored credentials");
                self.emit(SessionEvent::Expired);
                true
            }
            Ok(false) => {
                debug!("Token is no longer the stored one, ignoring");
                false
            }
            Err(e) => {
                error!("Failed to clear credential store: {}", e);
                false
            }
        }
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            token: self.read(StorageKey::Token),
            subject_id: self.read(StorageKey::SubjectId),
            display_name: self.read(StorageKey::DisplayName),
        }
    }

    /// Expiry instant of the stored token, if one is stored and decodable.
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.read(StorageKey::Token)
            .and_then(|token| token::expires_at(&token))
    }

    /// Token to attach to an outbound request.
    ///
    /// `None` when nobody is logged in. A stored but expired token tears the
    /// session down and fails with [`ApiError::TokenExpired`] so the request
    /// is never sent.
    pub fn authorize_request(&self) -> Result<Option<String>> {
        let Some(token) = self.store.get(StorageKey::Token)? else {
            return Ok(None);
        };

        if token::is_expired_at(&token, self.clock.now()) {
            self.expire_token(&token);
            return Err(ApiError::TokenExpired.into());
        }

        Ok(Some(token))
    }

    fn read(&self, key: StorageKey) -> Option<String> {
        self.store.get(key).unwrap_or_else(|e| {
            warn!("Failed to read {} from credential store: {}", key.as_str(), e);
            None
        })
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            error!("Failed to clear credential store: {}", e);
        }
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("No subscribers for {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::LoginResponse;
    use crate::error::{DEFAULT_LOGIN_ERROR, Error};
    use crate::session::clock::ManualClock;
    use crate::session::store::MemoryStore;
    use async_trait::async_trait;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::Duration;
    use tokio::sync::broadcast::error::TryRecvError;

    const NOW: i64 = 1_700_000_000;

    fn token_expiring(exp: i64) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp))
        )
    }

    enum Reply {
        Ok(Option<&'static str>),
        Rejected(Option<&'static str>),
        Network,
    }

    struct StubAuth {
        reply: Reply,
        token: String,
    }

    #[async_trait]
    impl AuthApi for StubAuth {
        async fn authenticate(&self, request: &LoginRequest) -> Result<LoginResponse> {
            assert_eq!(request.username, "alice");
            match self.reply {
                Reply::Ok(name) => Ok(LoginResponse {
                    token: Some(self.token.clone()),
                    subject_id: Some("S1".to_string()),
                    name: name.map(str::to_string),
                }),
                Reply::Rejected(msg) => Err(AuthError::rejected(msg.map(str::to_string)).into()),
                Reply::Network => Err(AuthError::Network("connection refused".to_string()).into()),
            }
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        clock: Arc<ManualClock>,
        session: SessionManager,
    }

    fn fixture_with(reply: Reply, token: String) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(NOW, 0).unwrap(),
        ));
        let session = SessionManager::new(store.clone(), Arc::new(StubAuth { reply, token }))
            .with_clock(clock.clone());
        Fixture {
            store,
            clock,
            session,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Reply::Ok(Some("Alice")), token_expiring(NOW + 3600))
    }

    #[tokio::test]
    async fn test_login_stores_credentials() {
        let f = fixture();

        assert!(f.session.login("alice", "correctpw").await.unwrap());

        let user = f.session.current_user();
        assert_eq!(user.token, Some(token_expiring(NOW + 3600)));
        assert_eq!(user.subject_id.as_deref(), Some("S1"));
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
        assert!(f.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_rejected_uses_server_message() {
        let f = fixture_with(Reply::Rejected(Some("invalid credentials")), String::new());

        let err = f.session.login("alice", "wrongpw").await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::Rejected(_))));
        assert_eq!(err.to_string(), "invalid credentials");
        assert!(!f.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_login_rejected_without_message_uses_default() {
        let f = fixture_with(Reply::Rejected(None), String::new());
        let err = f.session.login("alice", "wrongpw").await.unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_LOGIN_ERROR);
    }

    #[tokio::test]
    async fn test_login_network_failure_uses_default() {
        let f = fixture_with(Reply::Network, String::new());
        let err = f.session.login("alice", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_LOGIN_ERROR);
    }

    #[tokio::test]
    async fn test_login_without_token_fails() {
        let f = fixture_with(Reply::Ok(Some("Alice")), "  ".to_string());

        let err = f.session.login("alice", "pw").await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
        assert!(f.store.get(StorageKey::Token).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_overwrites_previous_identity() {
        let f = fixture_with(Reply::Ok(None), token_expiring(NOW + 60));
        f.store.insert_raw(StorageKey::DisplayName, "Mallory").unwrap();

        f.session.login("alice", "pw").await.unwrap();

        assert!(f.session.current_user().display_name.is_none());
    }

    #[tokio::test]
    async fn test_is_logged_in_flips_when_clock_passes_expiry() {
        let f = fixture();
        f.session.login("alice", "pw").await.unwrap();
        assert!(f.session.is_logged_in());

        f.clock.advance(Duration::seconds(3600));
        assert!(f.session.is_logged_in());

        f.clock.advance(Duration::milliseconds(1));
        assert!(!f.session.is_logged_in());

        // Nothing was cleared; the answer comes from the clock alone
        assert!(f.store.get(StorageKey::Token).unwrap().is_some());
    }

    #[test]
    fn test_is_logged_in_ignores_identity_without_token() {
        let f = fixture();
        f.store.insert_raw(StorageKey::SubjectId, "S1").unwrap();
        f.store.insert_raw(StorageKey::DisplayName, "Alice").unwrap();

        assert!(!f.session.is_logged_in());

        let user = f.session.current_user();
        assert!(user.token.is_none());
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_malformed_stored_token_is_logged_out() {
        let f = fixture();
        f.store.insert_raw(StorageKey::Token, "not-a-jwt").unwrap();
        assert!(!f.session.is_logged_in());
    }

    #[tokio::test]
    async fn test_logout_clears_and_emits() {
        let f = fixture();
        let mut events = f.session.subscribe();
        f.session.login("alice", "pw").await.unwrap();

        f.session.logout();

        assert!(!f.session.is_logged_in());
        assert_eq!(f.session.current_user(), CurrentUser::default());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert_eq!(SessionEvent::LoggedOut.redirect_target(), names::LOGIN);
    }

    #[test]
    fn test_logout_always_emits() {
        let f = fixture();
        let mut events = f.session.subscribe();

        f.session.logout();
        f.session.logout();

        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
    }

    #[tokio::test]
    async fn test_expire_token_runs_once_per_session() {
        let f = fixture();
        let mut events = f.session.subscribe();
        f.session.login("alice", "pw").await.unwrap();
        let token = f.session.current_user().token.unwrap();

        assert!(f.session.expire_token(&token));
        assert!(!f.session.expire_token(&token));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

        f.session.login("alice", "pw").await.unwrap();
        assert!(f.session.expire_token(&token));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);
    }

    #[tokio::test]
    async fn test_stale_token_does_not_end_newer_session() {
        let stale = token_expiring(NOW + 60);
        let f = fixture();
        let mut events = f.session.subscribe();
        f.store.insert_raw(StorageKey::Token, &stale).unwrap();

        f.session.login("alice", "pw").await.unwrap();

        assert!(!f.session.expire_token(&stale));
        assert!(f.session.is_logged_in());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_logout_suppresses_later_expiry() {
        let f = fixture();
        let mut events = f.session.subscribe();
        f.session.login("alice", "pw").await.unwrap();
        let token = f.session.current_user().token.unwrap();

        f.session.logout();
        assert!(!f.session.expire_token(&token));

        assert_eq!(events.try_recv().unwrap(), SessionEvent::LoggedOut);
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_authorize_request_returns_valid_token() {
        let f = fixture();
        assert!(f.session.authorize_request().unwrap().is_none());

        f.session.login("alice", "pw").await.unwrap();
        assert_eq!(
            f.session.authorize_request().unwrap(),
            Some(token_expiring(NOW + 3600))
        );
    }

    #[tokio::test]
    async fn test_authorize_request_tears_down_expired_token() {
        let f = fixture();
        let mut events = f.session.subscribe();
        f.session.login("alice", "pw").await.unwrap();
        f.clock.advance(Duration::hours(2));

        let err = f.session.authorize_request().unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::TokenExpired)));
        assert!(f.store.get(StorageKey::Token).unwrap().is_none());
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Expired);

        // Storage is now empty, so later requests go out anonymously
        assert!(f.session.authorize_request().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_expires_at() {
        let f = fixture();
        assert!(f.session.token_expires_at().is_none());

        f.session.login("alice", "pw").await.unwrap();
        assert_eq!(
            f.session.token_expires_at().map(|t| t.timestamp()),
            Some(NOW + 3600)
        );
    }
}
