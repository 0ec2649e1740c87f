use dioxus::prelude::*;

/// Labelled input bound to a signal, with an optional validation message.
#[component]
pub fn TextField(
    #[props(into)] label: String,
    mut value: Signal<String>,
    #[props(default = "text".to_string(), into)] input_type: String,
    #[props(optional, into)] placeholder: String,
    #[props(optional)] error: Option<&'static str>,
    #[props(optional)] on_enter: Option<EventHandler>,
) -> Element {
    let border = if error.is_some() {
        "border-red-500/60"
    } else {
        "border-white/10 focus:border-nexus-accent"
    };

    rsx! {
      div {
        label { class: "block text-xs font-mono text-gray-400 mb-1 uppercase tracking-wider",
          "{label}"
        }
        input {
          class: "w-full bg-nexus-dark border {border} rounded p-3 text-white focus:outline-none transition-all font-mono",
          value: "{value}",
          oninput: move |e| value.set(e.value()),
          "type": "{input_type}",
          placeholder: "{placeholder}",
          onkeydown: move |e| {
              if e.key() == Key::Enter {
                  if let Some(handler) = on_enter {
                      handler.call(());
                  }
              }
          },
        }
        if let Some(message) = error {
          p { class: "mt-1 text-xs text-red-400 font-mono", "{message}" }
        }
      }
    }
}
