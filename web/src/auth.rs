use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use nexus::{AppContext, SessionEvent};
use ui::{use_watch, Auth, Courses, Spinner};

use crate::storage::LocalStorage;

/// Session rejections reported by the HTTP layer, and how many of them the
/// route guard has acted on. Lives above the router so a rejection raised
/// before the guard mounts (startup revalidation) is still pending when it
/// does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionExpiry {
    raised: u32,
    handled: u32,
}

impl SessionExpiry {
    pub fn raise(&mut self) {
        self.raised += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.raised > self.handled
    }

    /// Marks every raised rejection handled. True if any was pending.
    pub fn take(&mut self) -> bool {
        let pending = self.is_pending();
        self.handled = self.raised;
        pending
    }
}

pub fn use_session_expiry() -> Signal<SessionExpiry> {
    use_context::<Signal<SessionExpiry>>()
}

/// Builds the application context, provides the store handles and runs
/// startup revalidation plus the session-event loop.
#[component]
pub fn AppProvider(children: Element) -> Element {
    let ctx = use_hook(|| {
        AppContext::builder()
            .storage(LocalStorage)
            .build()
            .expect("Failed to build application context")
    });
    let auth_state = use_watch({
        let ctx = ctx.clone();
        move || ctx.auth().subscribe()
    });
    let course_state = use_watch({
        let ctx = ctx.clone();
        move || ctx.courses().subscribe()
    });
    let mut expiry = use_signal(SessionExpiry::default);

    let auth = use_context_provider(|| Auth::new(ctx.auth().clone(), auth_state));
    use_context_provider(|| Courses::new(ctx.courses().clone(), course_state));
    use_context_provider(|| expiry);

    use_future({
        let ctx = ctx.clone();
        move || {
            let ctx = ctx.clone();
            async move { ctx.auth().initialize().await }
        }
    });

    use_future(move || {
        let ctx = ctx.clone();
        async move {
            ctx.run_session_guard(move |event| match event {
                SessionEvent::Invalidated => {
                    info!("Session rejected by the backend");
                    expiry.write().raise();
                }
            })
            .await;
        }
    });

    if !auth.is_initialized() {
        return rsx! {
            div { class: "flex flex-col items-center justify-center h-screen bg-nexus-dark",
                Spinner { label: "Nexus" }
            }
        };
    }

    rsx! {
        {children}
    }
}
