use std::future::Future;
use std::pin::Pin;

use dioxus::prelude::*;
use shared::forms::RegisterForm;
use ui::{use_auth, Layout, Register};

use crate::Route;

#[component]
pub fn RegisterPage() -> Element {
    let auth = use_auth();

    let register = move |form: RegisterForm| -> Pin<Box<dyn Future<Output = Result<(), String>>>> {
        Box::pin(async move {
            auth.register(form)
                .await
                .map_err(|e| e.user_message("Registration failed"))
        })
    };

    rsx! {
        Layout {
            Register { register: Callback::new(register) }
            p { class: "text-center text-sm text-gray-400 font-mono -mt-16 mb-10",
                "Already registered? "
                Link { class: "text-nexus-accent hover:underline", to: Route::LoginPage {}, "Sign in" }
            }
        }
    }
}
