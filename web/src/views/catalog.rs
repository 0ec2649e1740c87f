use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use nexus::services::{DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SHOWCASE_LIMIT};
use shared::course::{Course, CourseFilters};
use ui::{
    use_auth, use_courses, CourseCard, ErrorBanner, PageControls, SearchBar, Spinner,
    SuccessBanner,
};

use crate::Route;

#[component]
pub fn CatalogPage() -> Element {
    let auth = use_auth();
    let courses = use_courses();
    let navigator = use_navigator();
    let mut filters = use_signal(CourseFilters::default);
    let mut query = use_signal(String::new);
    let mut enrolling = use_signal(|| None::<String>);
    let mut notice = use_signal(String::new);

    use_future(move || async move {
        courses.load_showcase(DEFAULT_SHOWCASE_LIMIT).await;
    });

    // Enrollment badges follow whoever is logged in.
    let user_id = use_memo(move || auth.user_id());
    use_effect(move || {
        if let Some(user_id) = user_id() {
            spawn(async move {
                courses.load_enrollments(user_id).await;
            });
        }
    });

    // Reload whenever the search text or filters change.
    use_effect(move || {
        let filters = filters();
        let query = query();
        spawn(async move {
            if query.is_empty() {
                courses.load_page(DEFAULT_PAGE, DEFAULT_LIMIT, filters).await;
            } else {
                courses.search(query, filters).await;
            }
        });
    });

    let enroll = move |course_id: String| {
        if !auth.is_logged_in() {
            navigator.push(Route::LoginPage {});
            return;
        }
        spawn(async move {
            notice.set(String::new());
            enrolling.set(Some(course_id.clone()));
            if let Ok(enrollment) = courses.enroll(course_id).await {
                info!("Enrolled in {}", enrollment.course_id);
                notice.set("Enrolled! The course is now in your library.".to_string());
            }
            enrolling.set(None);
        });
    };

    let open = move |course_id: String| {
        navigator.push(Route::CourseDetailPage { id: course_id });
    };

    let change_page = move |page: u32| {
        spawn(async move {
            courses.load_page(page, DEFAULT_LIMIT, filters()).await;
        });
    };

    let state = courses.state();
    let state = state.read();
    let searching = !query.read().is_empty();
    let busy_id = enrolling();

    rsx! {
        div { class: "text-white w-full space-y-8",
            div { class: "text-center",
                h1 { class: "text-4xl font-bold text-nexus-accent mb-2 font-display", "Explore courses" }
                p { class: "text-gray-400 font-mono", "Learn from practitioners, at your own pace." }
            }

            SearchBar {
                categories: state.categories.clone(),
                on_search: move |text| query.set(text),
                on_category: move |category| filters.with_mut(|f: &mut CourseFilters| f.category = category),
                on_level: move |level| filters.with_mut(|f: &mut CourseFilters| f.level = level),
            }

            if let Some(error) = state.courses.error.clone() {
                ErrorBanner { message: error, on_dismiss: move |_| courses.clear_error() }
            }
            if let Some(error) = state.enrollment.error.clone() {
                ErrorBanner { message: error, on_dismiss: move |_| courses.clear_error() }
            }
            if !notice().is_empty() {
                SuccessBanner { message: notice() }
            }

            if !searching && !state.featured.is_empty() {
                CourseShelf {
                    title: "Featured",
                    courses: state.featured.clone(),
                    on_open: open,
                }
            }

            if state.courses.is_loading && !state.has_courses() {
                Spinner { label: "Loading courses" }
            } else if !state.has_courses() {
                div { class: "text-center text-gray-500 py-10 font-mono",
                    if state.courses.pagination.is_out_of_range() {
                        "No courses on this page."
                    } else {
                        "No courses match your search."
                    }
                }
            } else {
                div { class: "grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-6",
                    for course in state.courses.items.iter() {
                        CourseCard {
                            key: "{course.id}",
                            course: course.clone(),
                            enrolled: state.is_enrolled_in(&course.id),
                            busy: busy_id.as_deref() == Some(course.id.as_str()),
                            on_open: open,
                            on_enroll: enroll,
                        }
                    }
                }
            }

            if !searching {
                PageControls { pagination: state.courses.pagination, on_change: change_page }
            }

            if !searching && !state.popular.is_empty() {
                CourseShelf {
                    title: "Popular right now",
                    courses: state.popular.clone(),
                    on_open: open,
                }
            }
        }
    }
}

/// Compact horizontal list of course titles.
#[component]
fn CourseShelf(
    #[props(into)] title: String,
    courses: Vec<Course>,
    on_open: EventHandler<String>,
) -> Element {
    rsx! {
        section {
            h2 { class: "text-xs font-mono uppercase tracking-widest text-gray-500 mb-3", "{title}" }
            div { class: "flex gap-4 overflow-x-auto no-scrollbar pb-2",
                for course in courses {
                    button {
                        key: "{course.id}",
                        class: "shrink-0 w-56 text-left bg-nexus-panel border border-white/10 rounded p-3 hover:border-nexus-accent/50 cursor-pointer",
                        onclick: {
                            let id = course.id.clone();
                            move |_| on_open.call(id.clone())
                        },
                        p { class: "text-sm font-bold text-white truncate", "{course.title}" }
                        p { class: "text-xs text-gray-500 font-mono", "{course.category}" }
                    }
                }
            }
        }
    }
}
