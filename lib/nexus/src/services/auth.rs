use serde_json::Value;
use shared::auth::{AuthResponse, RefreshRequest, TokenResponse};
use shared::envelope::ApiResponse;
use shared::forms::{LoginForm, RegisterForm};
use shared::user::{User, UserUpdate};
use tracing::{error, info};

use crate::cache::{PersistentCache, AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use crate::error::{ClientError, Result};
use crate::http::{endpoints, ApiClient};

/// Stateless auth facade. Owns the read/write contract for cached
/// credentials; every network method is a single round trip.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    cache: PersistentCache,
}

impl AuthService {
    pub fn new(client: ApiClient, cache: PersistentCache) -> Self {
        Self { client, cache }
    }

    pub async fn login(&self, credentials: &LoginForm) -> Result<AuthResponse> {
        credentials.validate().map_err(ClientError::Validation)?;
        let response: ApiResponse<AuthResponse> = self
            .client
            .post(endpoints::auth::LOGIN, Some(credentials))
            .await
            .inspect_err(|e| error!("Login error: {e}"))?;

        self.store_auth(&response.data);
        info!("Logged in as {}", response.data.user.email);
        Ok(response.data)
    }

    pub async fn register(&self, profile: &RegisterForm) -> Result<AuthResponse> {
        profile.validate().map_err(ClientError::Validation)?;
        let response: ApiResponse<AuthResponse> = self
            .client
            .post(endpoints::auth::REGISTER, Some(profile))
            .await
            .inspect_err(|e| error!("Registration error: {e}"))?;

        self.store_auth(&response.data);
        info!("Registered {}", response.data.user.email);
        Ok(response.data)
    }

    /// Best-effort server logout. Local credentials are cleared whatever
    /// the network does.
    pub async fn logout(&self) {
        if let Some(refresh_token) = self.cache.get::<String>(REFRESH_TOKEN_KEY) {
            if let Err(e) = self
                .client
                .post::<Value, _>(endpoints::auth::LOGOUT, Some(RefreshRequest { refresh_token }))
                .await
            {
                error!("Logout error: {e}");
            }
        }
        self.clear_auth_data();
    }

    /// Exchanges the cached refresh token for a new access token. Any failure
    /// means the user has to log in again: the cache is wiped and `None`
    /// returned.
    pub async fn refresh_token(&self) -> Option<String> {
        match self.try_refresh().await {
            Ok(token) => Some(token),
            Err(e) => {
                error!("Token refresh error: {e}");
                self.clear_auth_data();
                None
            }
        }
    }

    async fn try_refresh(&self) -> Result<String> {
        let refresh_token = self
            .cache
            .get::<String>(REFRESH_TOKEN_KEY)
            .ok_or(ClientError::NoRefreshToken)?;

        let response: ApiResponse<TokenResponse> = self
            .client
            .post(endpoints::auth::REFRESH, Some(RefreshRequest { refresh_token }))
            .await?;

        let token = response.data.token;
        self.cache.set(AUTH_TOKEN_KEY, &token);
        Ok(token)
    }

    /// Fetches the profile behind the current credentials. `None` on any
    /// failure; the caller decides what that means.
    pub async fn get_current_user(&self) -> Option<User> {
        match self
            .client
            .get::<ApiResponse<User>>(endpoints::auth::PROFILE, Vec::new())
            .await
        {
            Ok(response) => {
                self.cache.set(USER_KEY, &response.data);
                Some(response.data)
            }
            Err(e) => {
                error!("Get current user error: {e}");
                None
            }
        }
    }

    /// Sends only the fields present in `update`. When the backend answers
    /// without echoing the record, the update is merged into the cached user.
    pub async fn update_profile(&self, user_id: &str, update: &UserUpdate) -> Result<User> {
        let response: ApiResponse<Option<User>> = self
            .client
            .put(&endpoints::users::profile(user_id), update)
            .await
            .inspect_err(|e| error!("Update profile error: {e}"))?;

        let user = match response.data {
            Some(user) => user,
            None => {
                let mut user = self.get_stored_user().ok_or(ClientError::NoActiveSession)?;
                update.apply(&mut user);
                user
            }
        };
        self.cache.set(USER_KEY, &user);
        Ok(user)
    }

    pub fn get_stored_user(&self) -> Option<User> {
        self.cache.get(USER_KEY)
    }

    pub fn get_stored_token(&self) -> Option<String> {
        self.cache.get(AUTH_TOKEN_KEY)
    }

    /// Local check only: both a token and an identity are cached.
    pub fn is_authenticated(&self) -> bool {
        self.get_stored_token().is_some() && self.get_stored_user().is_some()
    }

    pub fn clear_auth_data(&self) {
        self.cache.remove(AUTH_TOKEN_KEY);
        self.cache.remove(REFRESH_TOKEN_KEY);
        self.cache.remove(USER_KEY);
    }

    fn store_auth(&self, auth: &AuthResponse) {
        self.cache.set(AUTH_TOKEN_KEY, &auth.token);
        self.cache.set(REFRESH_TOKEN_KEY, &auth.refresh_token);
        self.cache.set(USER_KEY, &auth.user);
    }
}
