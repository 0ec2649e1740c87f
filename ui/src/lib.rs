//! This crate contains all shared UI for the workspace.

mod navbar;
pub use navbar::Navbar;

mod layout;
pub use layout::Layout;

mod hooks;
pub use hooks::use_watch;

mod auth;
pub use auth::*;

mod courses;
pub use courses::*;

mod components;
pub use components::*;
