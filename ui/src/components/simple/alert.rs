use dioxus::prelude::*;

#[component]
pub fn ErrorBanner(
    #[props(into)] message: String,
    #[props(optional)] on_dismiss: Option<EventHandler>,
) -> Element {
    rsx! {
      div { class: "p-3 bg-red-500/10 border border-red-500/50 rounded text-red-400 text-sm font-mono flex items-center gap-2",
        svg {
          class: "w-4 h-4 shrink-0",
          fill: "none",
          view_box: "0 0 24 24",
          stroke: "currentColor",
          path {
            stroke_linecap: "round",
            stroke_linejoin: "round",
            stroke_width: "2",
            d: "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
          }
        }
        span { class: "flex-1", "{message}" }
        if let Some(on_dismiss) = on_dismiss {
          button {
            class: "text-red-300 hover:text-white cursor-pointer",
            onclick: move |_| on_dismiss.call(()),
            "×"
          }
        }
      }
    }
}

#[component]
pub fn SuccessBanner(#[props(into)] message: String) -> Element {
    rsx! {
      div { class: "p-3 bg-green-900/20 border border-green-500/50 rounded text-green-400 text-sm font-mono",
        "{message}"
      }
    }
}

#[component]
pub fn Spinner(#[props(optional, into)] label: Option<String>) -> Element {
    rsx! {
      div { class: "flex flex-col justify-center items-center py-10",
        div { class: "animate-spin rounded-full h-16 w-16 border-t-4 border-b-4 border-nexus-accent" }
        if let Some(label) = label {
          p { class: "mt-6 text-nexus-accent font-mono animate-pulse", "{label}" }
        }
      }
    }
}
