//! Observable stores. Each store owns its state behind a `watch` channel so
//! every commit is a single atomic replacement from an observer's view.

mod auth;
mod course;
mod resource;

pub use auth::{AuthState, AuthStore, SessionPhase};
pub use course::{CourseState, CourseStore};
pub use resource::{RequestSequence, RequestStatus, ResourceCollection, Ticket};
