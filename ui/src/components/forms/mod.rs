use std::future::Future;
use std::pin::Pin;

use dioxus::prelude::*;

mod login;
mod profile;
mod register;

pub use login::Login;
pub use profile::ProfileEditor;
pub use register::Register;

/// Submit handler for a form: resolves to the message to show on failure.
pub type SubmitCallback<T> = Callback<T, Pin<Box<dyn Future<Output = Result<(), String>>>>>;
