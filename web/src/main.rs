use auth::{use_session_expiry, AppProvider};
use dioxus::prelude::*;

use ui::{use_auth, Layout, Navbar};
use views::{CatalogPage, CourseDetailPage, LoginPage, ProfilePage, RegisterPage};

mod auth;
mod storage;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AuthGuard)]
        #[route("/login")]
        LoginPage {},
        #[route("/register")]
        RegisterPage {},

        #[layout(WebNavbar)]
            #[route("/")]
            CatalogPage {},
            #[route("/courses/:id")]
            CourseDetailPage { id: String },
            #[route("/profile")]
            ProfilePage {},
}

impl Route {
    /// Pages that only make sense without a session.
    fn is_guest_only(&self) -> bool {
        matches!(self, Route::LoginPage {} | Route::RegisterPage {})
    }

    fn requires_session(&self) -> bool {
        matches!(self, Route::ProfilePage {})
    }
}

const MAIN_CSS: Asset = asset!("/assets/tailwind.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1" }
        document::Title { "Nexus" }

        AppProvider { Router::<Route> {} }
    }
}

#[component]
fn AuthGuard() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let current = use_route::<Route>();
    let mut expiry = use_session_expiry();

    use_effect(use_reactive((&current,), move |(current,)| {
        let is_logged_in = auth.is_logged_in();
        let rejected = expiry.read().is_pending();

        // A rejected session lands on /login, even from a public page.
        if rejected && expiry.write().take() {
            if !matches!(current, Route::LoginPage {}) {
                nav.replace(Route::LoginPage {});
            }
            return;
        }

        if !is_logged_in && current.requires_session() {
            nav.replace(Route::LoginPage {});
        }

        if is_logged_in && current.is_guest_only() {
            nav.replace(Route::CatalogPage {});
        }
    }));

    rsx! {
        Outlet::<Route> {}
    }
}

#[component]
fn WebNavbar() -> Element {
    let auth = use_auth();
    let initials = auth.user().map(|u| u.initials()).unwrap_or_default();
    let name = auth.user_name().unwrap_or_default();

    let logout = move |_| {
        spawn(async move {
            auth.logout().await;
        });
    };

    let role = auth.user_role().map(|r| r.label()).unwrap_or_default();

    rsx! {
        Layout {
            Navbar {
                session: rsx! {
                    if auth.is_logged_in() {
                        span {
                            class: "w-8 h-8 rounded-full bg-nexus-accent/20 text-nexus-accent text-xs font-mono flex items-center justify-center",
                            title: "{name} ({role})",
                            "{initials}"
                        }
                        button {
                            class: "text-red-400 hover:text-red-300 text-xs uppercase tracking-widest font-mono cursor-pointer",
                            onclick: logout,
                            "Logout"
                        }
                    } else {
                        Link {
                            class: "text-nexus-leaf text-xs uppercase tracking-widest font-mono",
                            to: Route::LoginPage {},
                            "Sign in"
                        }
                    }
                },

                Link {
                    class: "nav-link text-white font-medium border-b-2 border-transparent hover:border-nexus-accent pb-0.5",
                    active_class: "border-nexus-accent",
                    to: Route::CatalogPage {},
                    "Courses"
                }
                if auth.is_logged_in() {
                    Link {
                        class: "nav-link text-white font-medium border-b-2 border-transparent hover:border-nexus-accent pb-0.5",
                        active_class: "border-nexus-accent",
                        to: Route::ProfilePage {},
                        "Profile"
                    }
                }
            }

            main { class: "flex-grow flex flex-col relative w-full py-8",
                Outlet::<Route> {}
            }
        }
    }
}
