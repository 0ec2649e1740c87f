use std::future::Future;
use std::pin::Pin;

use dioxus::prelude::*;
use shared::forms::LoginForm;
use ui::{use_auth, Layout, Login};

use crate::Route;

/// Redirect after success is the route guard's job.
#[component]
pub fn LoginPage() -> Element {
    let auth = use_auth();

    let login = move |form: LoginForm| -> Pin<Box<dyn Future<Output = Result<(), String>>>> {
        Box::pin(async move {
            auth.login(form)
                .await
                .map_err(|e| e.user_message("Login failed"))
        })
    };

    rsx! {
        Layout {
            Login { login: Callback::new(login) }
            p { class: "text-center text-sm text-gray-400 font-mono -mt-16 mb-10",
                "No account yet? "
                Link { class: "text-nexus-accent hover:underline", to: Route::RegisterPage {}, "Register" }
            }
        }
    }
}
