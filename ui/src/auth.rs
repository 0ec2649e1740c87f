use dioxus::prelude::*;
use nexus::{AuthState, AuthStore, ClientError};
use shared::forms::{LoginForm, RegisterForm};
use shared::user::{User, UserRole, UserUpdate};

/// Component-side handle on the auth store. Reads go through the mirrored
/// signal so components re-render on change; actions go to the store.
#[derive(Clone, Copy)]
pub struct Auth {
    store: CopyValue<AuthStore>,
    state: Signal<AuthState>,
}

impl Auth {
    pub fn new(store: AuthStore, state: Signal<AuthState>) -> Self {
        Self {
            store: CopyValue::new(store),
            state,
        }
    }

    pub fn state(&self) -> Signal<AuthState> {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.read().is_authenticated()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().is_initialized()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    pub fn user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.read().user.as_ref().map(|u| u.id.clone())
    }

    pub fn user_name(&self) -> Option<String> {
        self.state.read().user_name()
    }

    pub fn user_role(&self) -> Option<UserRole> {
        self.state.read().user_role()
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    pub async fn login(&self, form: LoginForm) -> Result<(), ClientError> {
        self.store.cloned().login(&form).await
    }

    pub async fn register(&self, form: RegisterForm) -> Result<(), ClientError> {
        self.store.cloned().register(&form).await
    }

    pub async fn logout(&self) {
        self.store.cloned().logout().await;
    }

    pub async fn update_user(&self, update: UserUpdate) -> Result<(), ClientError> {
        self.store.cloned().update_user(&update).await
    }

    pub async fn refresh(&self) {
        self.store.cloned().refresh_auth().await;
    }

    pub fn clear_error(&self) {
        self.store.read().clear_error();
    }
}

pub fn use_auth() -> Auth {
    use_context::<Auth>()
}
