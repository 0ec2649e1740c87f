use dioxus::prelude::*;
use shared::forms::{FieldErrors, RegisterForm};

use super::SubmitCallback;
use crate::{Button, ErrorBanner, TextField};

#[derive(Props, PartialEq, Clone)]
pub struct Props {
    register: SubmitCallback<RegisterForm>,
}

#[component]
pub fn Register(props: Props) -> Element {
    let first_name = use_signal(String::new);
    let last_name = use_signal(String::new);
    let email = use_signal(String::new);
    let password = use_signal(String::new);
    let confirm_password = use_signal(String::new);
    let mut field_errors = use_signal(FieldErrors::default);
    let mut error = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    let mut handle_register = move || {
        let form = RegisterForm {
            first_name: first_name(),
            last_name: last_name(),
            email: email(),
            password: password(),
            confirm_password: confirm_password(),
        };
        if let Err(errors) = form.validate() {
            field_errors.set(errors);
            return;
        }
        field_errors.set(FieldErrors::default());
        spawn(async move {
            error.set(String::new());
            submitting.set(true);
            if let Err(e) = props.register.call(form).await {
                error.set(e);
            }
            submitting.set(false);
        });
    };

    rsx! {
      div { class: "flex flex-col items-center justify-center min-h-[70vh] text-white font-display",
        div { class: "p-8 bg-nexus-panel border border-white/10 rounded-lg shadow-2xl w-full max-w-lg relative z-10",
          h1 { class: "text-2xl font-bold tracking-tighter uppercase text-center mb-8",
            "Create your account"
          }

          div { class: "space-y-5",
            div { class: "grid grid-cols-1 md:grid-cols-2 gap-4",
              TextField {
                label: "First name",
                value: first_name,
                error: field_errors.read().get("firstName"),
              }
              TextField {
                label: "Last name",
                value: last_name,
                error: field_errors.read().get("lastName"),
              }
            }
            TextField {
              label: "Email",
              value: email,
              input_type: "email",
              placeholder: "you@example.com",
              error: field_errors.read().get("email"),
            }
            TextField {
              label: "Password",
              value: password,
              input_type: "password",
              error: field_errors.read().get("password"),
            }
            TextField {
              label: "Confirm password",
              value: confirm_password,
              input_type: "password",
              error: field_errors.read().get("confirmPassword"),
              on_enter: move |_| handle_register(),
            }

            if !error().is_empty() {
              ErrorBanner { message: error() }
            }

            Button {
              class: "w-full",
              loading: submitting(),
              onclick: move |_| handle_register(),
              "Create account"
            }

          }
        }
      }
    }
}
