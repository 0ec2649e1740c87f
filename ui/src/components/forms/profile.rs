use dioxus::prelude::*;
use shared::forms::is_valid_email;
use shared::user::{User, UserUpdate};

use super::SubmitCallback;
use crate::{Button, ErrorBanner, SuccessBanner, TextField};

/// Edits the profile fields of `user`. Only changed fields are submitted.
#[component]
pub fn ProfileEditor(user: User, save: SubmitCallback<UserUpdate>) -> Element {
    let first_name = use_signal(|| user.first_name.clone());
    let last_name = use_signal(|| user.last_name.clone());
    let email = use_signal(|| user.email.clone());
    let mut error = use_signal(String::new);
    let mut saved = use_signal(|| false);
    let mut saving = use_signal(|| false);

    let handle_save = move |_| {
        saved.set(false);
        let mut update = UserUpdate::default();
        if first_name() != user.first_name {
            update = update.first_name(first_name());
        }
        if last_name() != user.last_name {
            update = update.last_name(last_name());
        }
        if email() != user.email {
            if !is_valid_email(&email()) {
                error.set("Please enter a valid email".to_string());
                return;
            }
            update = update.email(email());
        }
        if update.is_empty() {
            error.set("Nothing to save".to_string());
            return;
        }

        spawn(async move {
            error.set(String::new());
            saving.set(true);
            match save.call(update).await {
                Ok(()) => saved.set(true),
                Err(e) => error.set(e),
            }
            saving.set(false);
        });
    };

    rsx! {
      div { class: "bg-nexus-panel border border-white/10 p-6 rounded-lg shadow-2xl space-y-4",
        h2 { class: "text-xl font-bold text-nexus-accent font-display", "Edit profile" }

        if !error().is_empty() {
          ErrorBanner { message: error() }
        }
        if saved() {
          SuccessBanner { message: "Profile updated" }
        }

        div { class: "grid grid-cols-1 md:grid-cols-2 gap-4",
          TextField { label: "First name", value: first_name }
          TextField { label: "Last name", value: last_name }
        }
        TextField { label: "Email", value: email, input_type: "email" }

        Button { loading: saving(), onclick: handle_save, "Save changes" }
      }
    }
}
