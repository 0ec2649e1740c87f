use std::future::Future;
use std::pin::Pin;

use dioxus::prelude::*;
use shared::user::UserUpdate;
use ui::{format_date, use_auth, Button, ButtonVariant, ProfileEditor, Spinner};

#[component]
pub fn ProfilePage() -> Element {
    let auth = use_auth();
    let mut refreshing = use_signal(|| false);

    let Some(user) = auth.user() else {
        return rsx! {
            Spinner {}
        };
    };

    let save = move |update: UserUpdate| -> Pin<Box<dyn Future<Output = Result<(), String>>>> {
        Box::pin(async move {
            auth.update_user(update)
                .await
                .map_err(|e| e.user_message("Update failed"))
        })
    };

    let sign_out = move |_| {
        spawn(async move {
            auth.logout().await;
        });
    };

    let refresh = move |_| {
        spawn(async move {
            refreshing.set(true);
            auth.refresh().await;
            refreshing.set(false);
        });
    };

    let joined = format_date(&user.created_at);
    let role = user.role.label();
    let name = user.full_name();
    let initials = user.initials();

    rsx! {
        div { class: "space-y-8 text-white w-full max-w-3xl z-10 mx-auto",
            div { class: "flex items-center gap-6",
                div { class: "w-16 h-16 rounded-full bg-nexus-accent/20 text-nexus-accent text-2xl font-mono flex items-center justify-center",
                    "{initials}"
                }
                div { class: "flex-grow",
                    h1 { class: "text-3xl font-bold font-display", "{name}" }
                    p { class: "text-gray-400 font-mono text-sm", "{user.email}" }
                    p { class: "text-gray-500 font-mono text-xs uppercase tracking-widest mt-1",
                        "{role} · member since {joined}"
                    }
                }
                div { class: "flex gap-3",
                    Button {
                        variant: ButtonVariant::Secondary,
                        loading: refreshing(),
                        onclick: refresh,
                        "Refresh"
                    }
                    Button { variant: ButtonVariant::Danger, onclick: sign_out, "Sign out" }
                }
            }

            ProfileEditor { key: "{user.updated_at}", user: user.clone(), save: Callback::new(save) }
        }
    }
}
