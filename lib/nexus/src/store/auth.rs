use std::future::Future;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use shared::auth::AuthResponse;
use shared::forms::{LoginForm, RegisterForm};
use shared::user::{User, UserRole, UserUpdate};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::cache::{PersistentCache, SESSION_STORAGE_KEY};
use crate::error::{ClientError, Result};
use crate::services::AuthService;

const SESSION_VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Initializing,
    Authenticated,
    Anonymous,
}

/// The session. `is_loading` overlays any phase while an action is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub phase: SessionPhase,
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            user: None,
            token: None,
            is_loading: true,
            error: None,
        }
    }
}

impl AuthState {
    fn anonymous() -> Self {
        Self {
            phase: SessionPhase::Anonymous,
            user: None,
            token: None,
            is_loading: false,
            error: None,
        }
    }

    fn authenticated(user: User, token: String) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            user: Some(user),
            token: Some(token),
            is_loading: false,
            error: None,
        }
    }

    /// True exactly when both an identity and a token are held.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    pub fn is_initialized(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Authenticated | SessionPhase::Anonymous
        )
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn user_name(&self) -> Option<String> {
        self.user.as_ref().map(User::full_name)
    }

    /// Recomputes the settled phase from the held credentials.
    fn settle_phase(&mut self) {
        self.phase = if self.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
    }
}

/// Projection of [`AuthState`] written to durable storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
}

impl From<&AuthState> for PersistedSession {
    fn from(state: &AuthState) -> Self {
        Self {
            user: state.user.clone(),
            token: state.token.clone(),
            is_authenticated: state.is_authenticated(),
        }
    }
}

/// Session state machine and single source of truth for who is logged in.
///
/// Login, register and logout are not coordinated with each other: when two
/// race, whichever finishes last decides the state.
#[derive(Clone)]
pub struct AuthStore {
    service: AuthService,
    cache: PersistentCache,
    state: Rc<watch::Sender<AuthState>>,
}

impl AuthStore {
    pub fn new(service: AuthService, cache: PersistentCache) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self {
            service,
            cache,
            state: Rc::new(state),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn commit(&self, update: impl FnOnce(&mut AuthState)) {
        self.state.send_modify(update);
        let persisted = PersistedSession::from(&*self.state.borrow());
        self.cache
            .set_versioned(SESSION_STORAGE_KEY, SESSION_VERSION, &persisted);
    }

    /// Loads the persisted subset verbatim and enters `Initializing`.
    pub fn restore(&self) {
        let persisted = self
            .cache
            .get_versioned::<PersistedSession>(SESSION_STORAGE_KEY, SESSION_VERSION)
            .unwrap_or_default();
        self.commit(|state| {
            state.phase = SessionPhase::Initializing;
            state.is_loading = true;
            state.error = None;
            state.user = persisted.user;
            state.token = persisted.token;
        });
    }

    /// Runs once at start: restore, then revalidate cached credentials
    /// against the backend. Always ends `Authenticated` or `Anonymous`.
    pub async fn initialize(&self) {
        self.restore();

        let stored_token = self.service.get_stored_token();
        let stored_user = self.service.get_stored_user();

        let (Some(token), Some(_)) = (stored_token, stored_user) else {
            debug!("No cached session");
            self.commit(|state| *state = AuthState::anonymous());
            return;
        };

        match self.service.get_current_user().await {
            Some(user) => {
                info!("Session revalidated for {}", user.email);
                self.commit(|state| *state = AuthState::authenticated(user, token));
            }
            None => {
                warn!("Cached session rejected by backend, clearing it");
                self.service.clear_auth_data();
                self.commit(|state| *state = AuthState::anonymous());
            }
        }
    }

    pub async fn login(&self, credentials: &LoginForm) -> Result<()> {
        self.authenticate(self.service.login(credentials), "Login failed")
            .await
    }

    pub async fn register(&self, profile: &RegisterForm) -> Result<()> {
        self.authenticate(self.service.register(profile), "Registration failed")
            .await
    }

    async fn authenticate(
        &self,
        attempt: impl Future<Output = Result<AuthResponse>>,
        fallback: &str,
    ) -> Result<()> {
        self.commit(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match attempt.await {
            Ok(auth) => {
                self.commit(|state| *state = AuthState::authenticated(auth.user, auth.token));
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(fallback);
                self.commit(|state| {
                    *state = AuthState::anonymous();
                    state.error = Some(message);
                });
                Err(e)
            }
        }
    }

    /// Always ends in an empty, error-free anonymous session.
    pub async fn logout(&self) {
        self.service.logout().await;
        self.commit(|state| *state = AuthState::anonymous());
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<()> {
        let user_id = self.state.borrow().user.as_ref().map(|u| u.id.clone());
        let Some(user_id) = user_id else {
            return Err(ClientError::NoActiveSession);
        };

        self.commit(|state| {
            state.is_loading = true;
            state.error = None;
        });

        match self.service.update_profile(&user_id, update).await {
            Ok(user) => {
                self.commit(|state| {
                    state.user = Some(user);
                    state.is_loading = false;
                    state.error = None;
                });
                Ok(())
            }
            Err(e) => {
                let message = e.user_message("Update failed");
                self.commit(|state| {
                    state.is_loading = false;
                    state.error = Some(message);
                });
                Err(e)
            }
        }
    }

    /// Re-fetches the identity. A session the backend no longer accepts is
    /// logged out rather than kept in a contradictory state.
    pub async fn refresh_auth(&self) {
        match self.service.get_current_user().await {
            Some(user) => self.commit(|state| {
                state.user = Some(user);
                state.settle_phase();
            }),
            None => {
                warn!("Could not refresh session, logging out");
                self.logout().await;
            }
        }
    }

    /// Swaps the access token using the cached refresh token. `None` means
    /// the session is gone and the user must log in again.
    pub async fn renew_token(&self) -> Option<String> {
        match self.service.refresh_token().await {
            Some(token) => {
                let renewed = token.clone();
                self.commit(|state| {
                    state.token = Some(renewed);
                    state.settle_phase();
                });
                Some(token)
            }
            None => {
                self.commit(|state| *state = AuthState::anonymous());
                None
            }
        }
    }

    /// Drops credentials after the backend rejected them. Keeps `error` so a
    /// form that caused the rejection can still show why.
    pub fn invalidate(&self) {
        self.service.clear_auth_data();
        let holds_credentials = {
            let state = self.state.borrow();
            state.user.is_some() || state.token.is_some()
        };
        if !holds_credentials {
            return;
        }
        info!("Session invalidated");
        self.commit(|state| {
            state.user = None;
            state.token = None;
            state.is_loading = false;
            state.settle_phase();
        });
    }

    pub fn clear_error(&self) {
        self.commit(|state| state.error = None);
    }

    pub fn set_loading(&self, loading: bool) {
        self.commit(|state| state.is_loading = loading);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use crate::http::{endpoints, Method};
    use crate::testing::{auth_payload, context, user_json, Reply};
    use crate::MemoryStorage;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn assert_invariant(state: &AuthState) {
        assert_eq!(
            state.phase == SessionPhase::Authenticated,
            state.user.is_some() && state.token.is_some(),
            "phase disagrees with credentials: {state:?}"
        );
    }

    #[tokio::test]
    async fn starts_uninitialized_and_loading() {
        let (_, ctx) = context(MemoryStorage::new());
        let state = ctx.auth().state();
        assert_eq!(state.phase, SessionPhase::Uninitialized);
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn login_populates_session_and_cache() {
        let storage = MemoryStorage::new();
        let (transport, ctx) = context(storage.clone());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));

        ctx.auth()
            .login(&LoginForm::new("a@b.com", "secret1"))
            .await
            .unwrap();

        let state = ctx.auth().state();
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("1"));
        assert_eq!(state.token.as_deref(), Some("tok1"));
        assert!(state.is_authenticated());
        assert!(!state.is_loading);
        assert_invariant(&state);
        assert_eq!(state.user_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(state.user_role(), Some(UserRole::Student));
        for key in [AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY, SESSION_STORAGE_KEY] {
            assert!(storage.keys().contains(&key.to_string()), "missing {key}");
        }
    }

    #[tokio::test]
    async fn failed_login_clears_session_and_reraises() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        transport.reply(
            Method::POST,
            endpoints::auth::LOGIN,
            Reply::status(400, json!({ "message": "Invalid credentials" })),
        );
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        let error = auth
            .login(&LoginForm::new("a@b.com", "secret2"))
            .await
            .unwrap_err();

        assert_eq!(error.status(), Some(400));
        let state = auth.state();
        assert_eq!(state.user, None);
        assert_eq!(state.token, None);
        assert!(!state.is_loading);
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn failed_register_falls_back_to_generic_message() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::REGISTER, Reply::Offline);
        let form = RegisterForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        };

        assert!(ctx.auth().register(&form).await.is_err());
        assert_eq!(
            ctx.auth().state().error.as_deref(),
            Some("Registration failed")
        );
    }

    #[tokio::test]
    async fn new_operation_clears_previous_error() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::Offline);
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        let auth = ctx.auth();

        let _ = auth.login(&LoginForm::new("a@b.com", "secret1")).await;
        assert!(auth.state().error.is_some());
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();
        assert_eq!(auth.state().error, None);
    }

    #[tokio::test]
    async fn logout_empties_session_even_offline() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        transport.reply(Method::POST, endpoints::auth::LOGOUT, Reply::Offline);
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        auth.logout().await;

        let state = auth.state();
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert_eq!(state.user, None);
        assert_eq!(state.token, None);
        assert_eq!(state.error, None);
        assert_invariant(&state);
        assert!(!ctx.auth_service().is_authenticated());
    }

    #[tokio::test]
    async fn invalidate_drops_credentials_but_keeps_error() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        transport.reply(
            Method::PUT,
            "/users/1",
            Reply::status(422, json!({ "message": "Email already taken" })),
        );
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();
        let _ = auth
            .update_user(&UserUpdate::default().email("taken@example.com"))
            .await;

        auth.invalidate();

        let state = auth.state();
        assert_invariant(&state);
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert_eq!(state.user, None);
        assert_eq!(state.error.as_deref(), Some("Email already taken"));
        assert!(!ctx.auth_service().is_authenticated());
    }

    #[tokio::test]
    async fn update_without_session_fails_before_network() {
        let (transport, ctx) = context(MemoryStorage::new());

        let error = ctx
            .auth()
            .update_user(&UserUpdate::default().first_name("New"))
            .await
            .unwrap_err();

        assert!(matches!(error, ClientError::NoActiveSession));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn update_merges_identity_and_keeps_token() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        let mut updated = user_json("1");
        updated["firstName"] = json!("New");
        transport.reply(Method::PUT, "/users/1", Reply::ok(updated));
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        auth.update_user(&UserUpdate::default().first_name("New"))
            .await
            .unwrap();

        let state = auth.state();
        assert_eq!(state.user.unwrap().first_name, "New");
        assert_eq!(state.token.as_deref(), Some("tok1"));
        assert_eq!(state.phase, SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn failed_update_keeps_prior_user() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        transport.reply(
            Method::PUT,
            "/users/1",
            Reply::status(422, json!({ "message": "Email already taken" })),
        );
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        assert!(auth
            .update_user(&UserUpdate::default().email("taken@example.com"))
            .await
            .is_err());

        let state = auth.state();
        assert_eq!(state.user.unwrap().email, "ada@example.com");
        assert_eq!(state.error.as_deref(), Some("Email already taken"));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn refresh_failure_logs_out() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        transport.reply(Method::GET, endpoints::auth::PROFILE, Reply::status(500, json!({})));
        transport.reply(Method::POST, endpoints::auth::LOGOUT, Reply::ok(json!(null)));
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        auth.refresh_auth().await;

        let state = auth.state();
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert_eq!(state.user, None);
        assert!(!ctx.auth_service().is_authenticated());
        assert_eq!(transport.count(Method::POST, endpoints::auth::LOGOUT), 1);
    }

    #[tokio::test]
    async fn refresh_success_merges_fresh_identity() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        let mut fresh = user_json("1");
        fresh["lastName"] = json!("Byron");
        transport.reply(Method::GET, endpoints::auth::PROFILE, Reply::ok(fresh));
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        auth.refresh_auth().await;

        let state = auth.state();
        assert_eq!(state.user.unwrap().last_name, "Byron");
        assert_eq!(state.phase, SessionPhase::Authenticated);
    }

    #[tokio::test]
    async fn session_survives_reload_and_is_revalidated() {
        let storage = MemoryStorage::new();
        {
            let (transport, ctx) = context(storage.clone());
            transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
            ctx.auth()
                .login(&LoginForm::new("a@b.com", "secret1"))
                .await
                .unwrap();
        }

        let (transport, ctx) = context(storage.clone());
        transport.reply(Method::GET, endpoints::auth::PROFILE, Reply::ok(user_json("1")));
        let auth = ctx.auth();

        auth.restore();
        let restored = auth.state();
        assert_eq!(restored.phase, SessionPhase::Initializing);
        assert_eq!(restored.user.as_ref().map(|u| u.id.as_str()), Some("1"));
        assert_eq!(restored.token.as_deref(), Some("tok1"));

        auth.initialize().await;
        let state = auth.state();
        assert_eq!(state.phase, SessionPhase::Authenticated);
        assert_eq!(state.token.as_deref(), Some("tok1"));
        assert!(!state.is_loading);
        assert_eq!(
            transport.requests()[0].header("Authorization"),
            Some("Bearer tok1")
        );
    }

    #[tokio::test]
    async fn rejected_session_is_cleared_on_initialize() {
        let storage = MemoryStorage::new();
        {
            let (transport, ctx) = context(storage.clone());
            transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
            ctx.auth()
                .login(&LoginForm::new("a@b.com", "secret1"))
                .await
                .unwrap();
        }

        let (transport, ctx) = context(storage.clone());
        transport.reply(Method::GET, endpoints::auth::PROFILE, Reply::status(401, json!({})));

        ctx.auth().initialize().await;

        let state = ctx.auth().state();
        assert_eq!(state.phase, SessionPhase::Anonymous);
        assert!(!state.is_loading);
        assert!(!ctx.auth_service().is_authenticated());
        assert!(!storage.keys().contains(&AUTH_TOKEN_KEY.to_string()));
    }

    #[tokio::test]
    async fn initialize_without_cache_skips_network() {
        let (transport, ctx) = context(MemoryStorage::new());

        ctx.auth().initialize().await;

        assert_eq!(ctx.auth().state().phase, SessionPhase::Anonymous);
        assert!(!ctx.auth().state().is_loading);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn renew_token_replaces_or_drops_session() {
        let (transport, ctx) = context(MemoryStorage::new());
        transport.reply(Method::POST, endpoints::auth::LOGIN, Reply::ok(auth_payload("1")));
        transport.reply(
            Method::POST,
            endpoints::auth::REFRESH,
            Reply::ok(json!({ "token": "tok2" })),
        );
        transport.reply(Method::POST, endpoints::auth::REFRESH, Reply::status(401, json!({})));
        let auth = ctx.auth();
        auth.login(&LoginForm::new("a@b.com", "secret1")).await.unwrap();

        assert_eq!(auth.renew_token().await.as_deref(), Some("tok2"));
        let renewed = auth.state();
        assert_eq!(renewed.token.as_deref(), Some("tok2"));
        assert_eq!(renewed.phase, SessionPhase::Authenticated);
        assert_invariant(&renewed);

        assert_eq!(auth.renew_token().await, None);
        let dropped = auth.state();
        assert_eq!(dropped.phase, SessionPhase::Anonymous);
        assert_invariant(&dropped);
    }

    #[tokio::test]
    async fn observers_see_loading_then_result() {
        let (transport, ctx) = context(MemoryStorage::new());
        let release = transport.gate(
            Method::POST,
            endpoints::auth::LOGIN,
            Reply::ok(auth_payload("1")),
        );
        let mut observer = ctx.auth().subscribe();
        observer.borrow_and_update();

        let login_form = LoginForm::new("a@b.com", "secret1");
        let login = ctx.auth().login(&login_form);
        let watch = async {
            observer.changed().await.unwrap();
            let first = observer.borrow_and_update().clone();
            assert!(first.is_loading);
            assert_eq!(first.error, None);
            assert_invariant(&first);
            release.send(()).unwrap();
        };
        let (result, ()) = futures::join!(login, watch);
        result.unwrap();

        assert_invariant(&ctx.auth().state());
    }
}
