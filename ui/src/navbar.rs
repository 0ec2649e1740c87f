use dioxus::prelude::*;

/// Top bar: brand on the left, section links in the middle and the session
/// area (avatar, sign in or out) on the right.
#[component]
pub fn Navbar(children: Element, session: Element) -> Element {
    rsx! {
        header { class: "grid grid-cols-[auto_1fr_auto] items-center gap-6 py-5 border-b border-white/5",
            div { class: "flex items-center gap-3",
                div { class: "w-9 h-9 rounded-lg bg-gradient-to-br from-nexus-accent to-nexus-leaf flex items-center justify-center",
                    span { class: "text-nexus-dark font-display font-black text-lg leading-none", "N" }
                }
                div { class: "leading-tight",
                    p { class: "text-xl font-bold font-display tracking-tight text-white", "Nexus" }
                    p { class: "text-[10px] font-mono uppercase tracking-widest text-gray-500",
                        "Learning platform"
                    }
                }
            }

            nav { class: "flex items-center justify-center gap-6", {children} }

            div { class: "flex items-center gap-3 justify-end", {session} }
        }
    }
}
