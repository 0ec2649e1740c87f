use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
use shared::course::CourseLevel;

const DEBOUNCE_MS: u32 = 300;

/// Free-text search plus category and level filters. Typing is debounced;
/// `on_search` fires with the settled text.
#[component]
pub fn SearchBar(
    categories: Vec<String>,
    on_search: EventHandler<String>,
    on_category: EventHandler<Option<String>>,
    on_level: EventHandler<Option<CourseLevel>>,
) -> Element {
    let mut query = use_signal(String::new);
    let mut typed = use_signal(|| 0u64);

    let handle_input = move |event: FormEvent| {
        query.set(event.value());
        typed += 1;
        let generation = *typed.peek();
        spawn(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            if *typed.peek() == generation {
                on_search.call(query.peek().trim().to_string());
            }
        });
    };

    rsx! {
      div { class: "flex flex-col sm:flex-row gap-4 mb-8",
        input {
          value: "{query}",
          class: "flex-grow bg-nexus-dark text-white placeholder-gray-500 px-4 py-2 rounded-md border border-white/10 focus:outline-none focus:border-nexus-accent",
          placeholder: "Search courses...",
          oninput: handle_input,
        }
        select {
          class: "bg-nexus-dark text-white px-3 py-2 rounded-md border border-white/10 font-mono text-sm",
          onchange: move |e| {
              let value = e.value();
              on_category.call((!value.is_empty()).then_some(value));
          },
          option { value: "", "All categories" }
          for category in categories.iter() {
            option { key: "{category}", value: "{category}", "{category}" }
          }
        }
        select {
          class: "bg-nexus-dark text-white px-3 py-2 rounded-md border border-white/10 font-mono text-sm",
          onchange: move |e| {
              let value = e.value();
              on_level.call(CourseLevel::ALL.into_iter().find(|l| l.as_str() == value));
          },
          option { value: "", "All levels" }
          for (value, label) in CourseLevel::ALL.iter().map(|l| (l.as_str(), l.label())) {
            option { key: "{value}", value: "{value}", "{label}" }
          }
        }
      }
    }
}
