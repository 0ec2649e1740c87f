use dioxus::prelude::*;
use nexus::{ClientError, CourseState, CourseStore};
use shared::course::{CourseFilters, Enrollment};

/// Component-side handle on the course store.
#[derive(Clone, Copy)]
pub struct Courses {
    store: CopyValue<CourseStore>,
    state: Signal<CourseState>,
}

impl Courses {
    pub fn new(store: CourseStore, state: Signal<CourseState>) -> Self {
        Self {
            store: CopyValue::new(store),
            state,
        }
    }

    pub fn state(&self) -> Signal<CourseState> {
        self.state
    }

    pub async fn load_page(&self, page: u32, limit: u32, filters: CourseFilters) {
        self.store.cloned().get_courses(page, limit, &filters).await;
    }

    pub async fn search(&self, query: String, filters: CourseFilters) {
        self.store.cloned().search_courses(&query, &filters).await;
    }

    /// Course, lessons and first page of reviews.
    pub async fn open(&self, id: String) {
        let store = self.store.cloned();
        store.get_course_by_id(&id).await;
        store.load_lessons(&id).await;
        store.load_reviews(&id, 1).await;
    }

    pub fn close(&self) {
        self.store.read().clear_current_course();
    }

    pub async fn enroll(&self, course_id: String) -> Result<Enrollment, ClientError> {
        self.store.cloned().enroll_in_course(&course_id).await
    }

    pub async fn load_showcase(&self, limit: u32) {
        let store = self.store.cloned();
        store.get_categories().await;
        store.get_featured_courses(limit).await;
        store.get_popular_courses(limit).await;
    }

    pub async fn load_enrollments(&self, user_id: String) {
        self.store.cloned().load_enrollments(&user_id).await;
    }

    pub fn clear_error(&self) {
        self.store.read().clear_error();
    }
}

pub fn use_courses() -> Courses {
    use_context::<Courses>()
}
