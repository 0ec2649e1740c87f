//! Wire and domain types shared by the client core, the UI crate and the web app.

pub mod auth;
pub mod course;
pub mod envelope;
pub mod forms;
pub mod user;
