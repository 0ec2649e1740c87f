use dioxus::prelude::*;
use ui::{
    format_duration, format_price, use_auth, use_courses, Button, ErrorBanner, LessonList,
    ReviewList, Spinner,
};

use crate::Route;

#[component]
pub fn CourseDetailPage(id: String) -> Element {
    let auth = use_auth();
    let courses = use_courses();
    let navigator = use_navigator();
    let mut enrolling = use_signal(|| false);

    use_effect(use_reactive((&id,), move |(id,)| {
        spawn(async move {
            courses.open(id).await;
        });
    }));
    use_drop(move || courses.close());

    let state = courses.state();
    let state = state.read();

    let Some(course) = state.current_course().filter(|c| c.id == id).cloned() else {
        return rsx! {
            if let Some(error) = state.detail.error.clone() {
                ErrorBanner { message: error }
            } else {
                Spinner { label: "Loading course" }
            }
        };
    };

    let enrolled = state.is_enrolled_in(&course.id);
    let lessons = state.lessons.clone();
    let reviews = state.reviews.clone();
    let instructor = format!(
        "{} {}",
        course.instructor.first_name, course.instructor.last_name
    );
    let duration = format_duration(course.duration);
    let price = format_price(course.effective_price());
    let level = course.level.label();
    let rating = format!(
        "★ {:.1} · {} reviews · {} students",
        course.rating, course.review_count, course.student_count
    );

    let enroll = {
        let course_id = course.id.clone();
        move |_| {
            if !auth.is_logged_in() {
                navigator.push(Route::LoginPage {});
                return;
            }
            let course_id = course_id.clone();
            spawn(async move {
                enrolling.set(true);
                let _ = courses.enroll(course_id).await;
                enrolling.set(false);
            });
        }
    };

    rsx! {
        div { class: "text-white w-full max-w-4xl mx-auto space-y-8",
            Link {
                class: "text-xs font-mono uppercase tracking-widest text-gray-500 hover:text-white",
                to: Route::CatalogPage {},
                "← All courses"
            }

            if let Some(error) = state.enrollment.error.clone() {
                ErrorBanner { message: error, on_dismiss: move |_| courses.clear_error() }
            }

            div { class: "space-y-3",
                div { class: "flex gap-3 text-[10px] font-mono uppercase tracking-widest text-gray-500",
                    span { "{course.category}" }
                    span { "{level}" }
                    span { "{duration}" }
                }
                h1 { class: "text-4xl font-bold font-display", "{course.title}" }
                p { class: "text-gray-300", "{course.description}" }
                p { class: "text-sm text-gray-400 font-mono", "{rating}" }
                p { class: "text-sm text-gray-500 font-mono", "Taught by {instructor}" }
            }

            div { class: "flex items-center gap-6",
                span { class: "text-2xl font-mono text-nexus-leaf", "{price}" }
                if enrolled {
                    span { class: "text-sm font-mono uppercase text-nexus-leaf", "You are enrolled" }
                } else {
                    Button { loading: enrolling(), onclick: enroll, "Enroll now" }
                }
            }

            section { class: "space-y-3",
                h2 { class: "text-xl font-bold text-nexus-accent font-display", "Lessons" }
                LessonList { lessons }
            }

            section { class: "space-y-3",
                h2 { class: "text-xl font-bold text-nexus-accent font-display", "Reviews" }
                ReviewList { reviews }
            }
        }
    }
}
