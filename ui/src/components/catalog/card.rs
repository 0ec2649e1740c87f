use dioxus::prelude::*;
use shared::course::Course;

use super::{format_duration, format_price};
use crate::{Button, ButtonVariant};

#[component]
pub fn CourseCard(
    course: Course,
    enrolled: bool,
    #[props(optional)] busy: bool,
    on_open: EventHandler<String>,
    on_enroll: EventHandler<String>,
) -> Element {
    let open_id = course.id.clone();
    let enroll_id = course.id.clone();
    let instructor = format!(
        "{} {}",
        course.instructor.first_name, course.instructor.last_name
    );
    let has_discount = course.discount_price.is_some();
    let rating = format!("★ {:.1} ({})", course.rating, course.review_count);
    let duration = format_duration(course.duration);
    let price = format_price(course.effective_price());
    let list_price = format_price(course.price);
    let level = course.level.label();

    rsx! {
      div { class: "bg-nexus-panel border border-white/10 rounded-lg overflow-hidden flex flex-col hover:border-nexus-accent/50 transition-colors",
        div {
          class: "h-36 bg-nexus-dark bg-cover bg-center cursor-pointer",
          style: "background-image: url('{course.thumbnail}')",
          onclick: move |_| on_open.call(open_id.clone()),
        }
        div { class: "p-4 flex flex-col gap-2 flex-grow",
          div { class: "flex justify-between text-[10px] font-mono uppercase tracking-widest text-gray-500",
            span { "{course.category}" }
            span { "{level}" }
          }
          h3 { class: "text-lg font-bold text-white leading-tight", "{course.title}" }
          p { class: "text-sm text-gray-400 line-clamp-2",
            if course.short_description.is_empty() {
              "{course.description}"
            } else {
              "{course.short_description}"
            }
          }
          p { class: "text-xs text-gray-500 font-mono", "by {instructor}" }
          div { class: "flex items-center gap-3 text-xs font-mono text-gray-400",
            span { "{rating}" }
            span { "{duration}" }
          }
          div { class: "mt-auto pt-3 flex items-center justify-between",
            div { class: "font-mono",
              span { class: "text-nexus-leaf font-bold", "{price}" }
              if has_discount {
                span { class: "ml-2 text-xs text-gray-500 line-through", "{list_price}" }
              }
            }
            if enrolled {
              span { class: "text-xs font-mono uppercase text-nexus-leaf", "Enrolled" }
            } else {
              Button {
                variant: ButtonVariant::Secondary,
                loading: busy,
                onclick: move |_| on_enroll.call(enroll_id.clone()),
                "Enroll"
              }
            }
          }
        }
      }
    }
}
