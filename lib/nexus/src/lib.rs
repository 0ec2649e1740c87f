//! Client core for the Nexus learning platform.
//!
//! Everything the UI needs to talk to the REST backend lives here: the
//! persistent cache, the HTTP client and its interceptors, the stateless
//! services and the observable stores that own session and catalog state.

pub mod cache;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod services;
pub mod storage;
pub mod store;

#[cfg(test)]
mod testing;

pub use cache::PersistentCache;
pub use config::ClientConfig;
pub use context::{AppContext, AppContextBuilder};
pub use error::{ClientError, Result};
pub use http::{ApiClient, SessionEvent, Transport};
pub use services::{AuthService, CourseService};
pub use storage::{MemoryStorage, StorageBackend};
pub use store::{AuthState, AuthStore, CourseState, CourseStore, SessionPhase};
