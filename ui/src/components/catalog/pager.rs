use dioxus::prelude::*;
use shared::envelope::Pagination;

use crate::{Button, ButtonVariant};

#[component]
pub fn PageControls(pagination: Pagination, on_change: EventHandler<u32>) -> Element {
    if pagination.total_pages <= 1 && !pagination.is_out_of_range() {
        return rsx! {};
    }
    let page = pagination.page;
    let last = pagination.total_pages.max(1);

    rsx! {
      div { class: "flex justify-center items-center gap-4 py-6 font-mono text-sm text-gray-400",
        Button {
          variant: ButtonVariant::Secondary,
          disabled: page <= 1,
          onclick: move |_| on_change.call(page.saturating_sub(1).clamp(1, last)),
          "Prev"
        }
        span { "Page {page} of {last}" }
        Button {
          variant: ButtonVariant::Secondary,
          disabled: !pagination.has_more_pages(),
          onclick: move |_| on_change.call(page + 1),
          "Next"
        }
      }
    }
}
