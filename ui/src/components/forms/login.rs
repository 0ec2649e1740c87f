use dioxus::prelude::*;
use shared::forms::{FieldErrors, LoginForm};

use super::SubmitCallback;
use crate::{Button, ErrorBanner, TextField};

#[derive(Props, PartialEq, Clone)]
pub struct Props {
    login: SubmitCallback<LoginForm>,
}

#[component]
pub fn Login(props: Props) -> Element {
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let mut field_errors = use_signal(FieldErrors::default);
    let mut error = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let mut handle_login = move || {
        let form = LoginForm::new(email(), password());
        if let Err(errors) = form.validate() {
            field_errors.set(errors);
            return;
        }
        field_errors.set(FieldErrors::default());
        spawn(async move {
            error.set(String::new());
            submitting.set(true);
            if let Err(e) = props.login.call(form).await {
                error.set(e);
            }
            submitting.set(false);
        });
    };

    rsx! {
      div { class: "flex flex-col items-center justify-center min-h-[70vh] text-white font-display",
        div { class: "p-8 bg-nexus-panel border border-white/10 rounded-lg shadow-2xl w-full max-w-md relative z-10",
          div { class: "flex flex-col items-center mb-8",
            h1 { class: "text-2xl font-bold tracking-tighter uppercase text-transparent bg-clip-text bg-gradient-to-r from-white to-gray-400",
              "Welcome back"
            }
            p { class: "text-sm text-nexus-leaf font-mono mt-2 tracking-widest",
              "SIGN IN TO CONTINUE LEARNING"
            }
          }

          div { class: "space-y-6",
            TextField {
              label: "Email",
              value: email,
              input_type: "email",
              placeholder: "you@example.com",
              error: field_errors.read().get("email"),
              on_enter: move |_| handle_login(),
            }
            TextField {
              label: "Password",
              value: password,
              input_type: "password",
              placeholder: "Enter password",
              error: field_errors.read().get("password"),
              on_enter: move |_| handle_login(),
            }

            if !error().is_empty() {
              ErrorBanner { message: error() }
            }

            Button {
              class: "w-full",
              loading: submitting(),
              onclick: move |_| handle_login(),
              "Sign in"
            }

          }
        }
      }
    }
}
