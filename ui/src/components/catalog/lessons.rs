use dioxus::prelude::*;
use shared::course::{Lesson, Review};

use super::{format_date, format_duration};

#[component]
pub fn LessonList(lessons: Vec<Lesson>) -> Element {
    if lessons.is_empty() {
        return rsx! {
          p { class: "text-gray-500 font-mono text-sm", "No lessons published yet." }
        };
    }

    rsx! {
      ol { class: "divide-y divide-white/5 border border-white/10 rounded-lg",
        for (lesson, length) in lessons.iter().map(|l| (l, format_duration(l.duration))) {
          li { key: "{lesson.id}", class: "flex items-center justify-between px-4 py-3",
            div { class: "flex items-center gap-3",
              span { class: "text-xs font-mono text-gray-500 w-6", "{lesson.order}" }
              span { class: "text-white", "{lesson.title}" }
              if lesson.is_preview {
                span { class: "text-[10px] font-mono uppercase text-nexus-leaf border border-nexus-leaf/40 rounded px-1",
                  "Preview"
                }
              }
            }
            span { class: "text-xs font-mono text-gray-400", "{length}" }
          }
        }
      }
    }
}

#[component]
pub fn ReviewList(reviews: Vec<Review>) -> Element {
    if reviews.is_empty() {
        return rsx! {
          p { class: "text-gray-500 font-mono text-sm", "No reviews yet." }
        };
    }

    rsx! {
      ul { class: "space-y-3",
        for review in reviews {
          ReviewItem { key: "{review.id}", review: review.clone() }
        }
      }
    }
}

#[component]
fn ReviewItem(review: Review) -> Element {
    let stars = "★".repeat(usize::from(review.rating.min(5)));
    let posted = format_date(&review.created_at);

    rsx! {
      li { class: "bg-nexus-dark/60 border border-white/5 rounded p-3",
        div { class: "flex justify-between text-xs font-mono text-gray-500",
          span { class: "text-nexus-leaf", "{stars}" }
          span { "{posted}" }
        }
        if !review.comment.is_empty() {
          p { class: "mt-2 text-sm text-gray-300", "{review.comment}" }
        }
      }
    }
}
