use std::rc::Rc;

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::cache::PersistentCache;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ApiClient, ReqwestTransport, SessionEvent, Transport};
use crate::services::{AuthService, CourseService};
use crate::storage::{MemoryStorage, StorageBackend};
use crate::store::{AuthStore, CourseStore};

/// Everything the app shares: one client, one cache, one instance of each
/// service and store. Built once at startup and handed down explicitly.
#[derive(Clone)]
pub struct AppContext {
    config: Rc<ClientConfig>,
    client: ApiClient,
    auth_service: AuthService,
    course_service: CourseService,
    auth: AuthStore,
    courses: CourseStore,
}

impl AppContext {
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }

    pub fn course_service(&self) -> &CourseService {
        &self.course_service
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn courses(&self) -> &CourseStore {
        &self.courses
    }

    pub fn subscribe_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.client.subscribe()
    }

    /// Applies a session event to the stores. Navigation is the caller's job.
    pub fn handle_session_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Invalidated => self.auth.invalidate(),
        }
    }

    /// Keeps the auth store in step with credential rejections seen by the
    /// HTTP layer, then hands each event to `on_event` (navigation, counters).
    /// Runs until the client is dropped.
    pub async fn run_session_guard(&self, mut on_event: impl FnMut(SessionEvent)) {
        let mut events = self.subscribe_session_events();
        loop {
            match events.recv().await {
                Ok(event) => {
                    debug!("Session event: {event:?}");
                    self.handle_session_event(event);
                    on_event(event);
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Session guard lagged, skipped {skipped} events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

pub struct AppContextBuilder {
    config: Option<ClientConfig>,
    storage: Option<Rc<dyn StorageBackend>>,
    transport: Option<Rc<dyn Transport>>,
}

impl AppContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            storage: None,
            transport: None,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn storage(mut self, storage: impl StorageBackend + 'static) -> Self {
        self.storage = Some(Rc::new(storage));
        self
    }

    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Rc::new(transport));
        self
    }

    pub fn build(self) -> Result<AppContext> {
        let config = self.config.unwrap_or_else(ClientConfig::from_env);

        let storage = match self.storage {
            Some(storage) => storage,
            None => {
                warn!("No durable storage configured, sessions will not survive a reload");
                Rc::new(MemoryStorage::new())
            }
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Rc::new(ReqwestTransport::new(&config.api_url)?),
        };

        let cache = PersistentCache::new(storage);
        let client = ApiClient::new(transport, cache.clone(), config.timeout);
        let auth_service = AuthService::new(client.clone(), cache.clone());
        let course_service = CourseService::new(client.clone());
        let auth = AuthStore::new(auth_service.clone(), cache);
        let courses = CourseStore::new(course_service.clone());

        info!(
            "{} {} ({}) using {}",
            config.app_name, config.app_version, config.environment, config.api_url
        );

        Ok(AppContext {
            config: Rc::new(config),
            client,
            auth_service,
            course_service,
            auth,
            courses,
        })
    }
}

impl Default for AppContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
