use std::rc::Rc;

use shared::course::{Course, CourseFilters, Enrollment, Lesson, Review};
use tokio::sync::watch;
use tracing::{debug, error};

use super::resource::{RequestSequence, RequestStatus, ResourceCollection};
use crate::error::Result;
use crate::services::CourseService;

const REVIEWS_PER_PAGE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseState {
    /// Catalog listing and the focused course. `is_loading` and `error`
    /// here describe the listing only.
    pub courses: ResourceCollection<Course>,
    /// Fetch of the focused course.
    pub detail: RequestStatus,
    pub enrollment: RequestStatus,
    pub featured: Vec<Course>,
    pub popular: Vec<Course>,
    pub categories: Vec<String>,
    pub enrollments: Vec<Enrollment>,
    pub lessons: Vec<Lesson>,
    pub reviews: Vec<Review>,
}

impl CourseState {
    pub fn current_course(&self) -> Option<&Course> {
        self.courses.selected.as_ref()
    }

    pub fn has_courses(&self) -> bool {
        self.courses.has_items()
    }

    pub fn has_more_pages(&self) -> bool {
        self.courses.has_more_pages()
    }

    pub fn is_enrolled_in(&self, course_id: &str) -> bool {
        self.enrollments.iter().any(|e| e.course_id == course_id)
    }

    pub fn is_loading(&self) -> bool {
        self.courses.is_loading || self.detail.is_loading || self.enrollment.is_loading
    }
}

/// Catalog store. `get_courses` and `search_courses` share one request
/// sequence and status since both write `items`; `get_course_by_id` has its
/// own sequence and status, and enrollment has its own status.
#[derive(Clone)]
pub struct CourseStore {
    service: CourseService,
    state: Rc<watch::Sender<CourseState>>,
    listing: Rc<RequestSequence>,
    detail: Rc<RequestSequence>,
}

impl CourseStore {
    pub fn new(service: CourseService) -> Self {
        let (state, _) = watch::channel(CourseState::default());
        Self {
            service,
            state: Rc::new(state),
            listing: Rc::default(),
            detail: Rc::default(),
        }
    }

    pub fn state(&self) -> CourseState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CourseState> {
        self.state.subscribe()
    }

    fn commit(&self, update: impl FnOnce(&mut CourseState)) {
        self.state.send_modify(update);
    }

    pub async fn get_courses(&self, page: u32, limit: u32, filters: &CourseFilters) {
        let ticket = self.listing.issue();
        self.commit(|state| state.courses.begin());

        let result = self.service.get_courses(page, limit, filters).await;
        if !self.listing.is_current(ticket) {
            debug!("Dropping stale course page {page}");
            return;
        }
        match result {
            Ok(response) => self.commit(|state| state.courses.replace_page(response)),
            Err(e) => {
                let message = e.user_message("Failed to fetch courses");
                self.commit(|state| state.courses.fail(message));
            }
        }
    }

    pub async fn get_course_by_id(&self, id: &str) {
        let ticket = self.detail.issue();
        self.commit(|state| state.detail.begin());

        let result = self.service.get_course_by_id(id).await;
        if !self.detail.is_current(ticket) {
            debug!("Dropping stale course detail {id}");
            return;
        }
        match result {
            Ok(course) => self.commit(|state| {
                state.courses.select(course);
                state.detail.settle();
            }),
            Err(e) => {
                let message = e.user_message("Failed to fetch course");
                self.commit(|state| state.detail.fail(message));
            }
        }
    }

    /// Replaces the listing with search results; pagination is left as is.
    pub async fn search_courses(&self, query: &str, filters: &CourseFilters) {
        let ticket = self.listing.issue();
        self.commit(|state| state.courses.begin());

        let result = self.service.search_courses(query, filters).await;
        if !self.listing.is_current(ticket) {
            debug!("Dropping stale search results for '{query}'");
            return;
        }
        match result {
            Ok(courses) => self.commit(|state| state.courses.replace_items(courses)),
            Err(e) => {
                let message = e.user_message("Search failed");
                self.commit(|state| state.courses.fail(message));
            }
        }
    }

    /// Enrollment failures are returned so the caller can stay on the page.
    pub async fn enroll_in_course(&self, course_id: &str) -> Result<Enrollment> {
        self.commit(|state| state.enrollment.begin());

        match self.service.enroll_in_course(course_id).await {
            Ok(enrollment) => {
                let added = enrollment.clone();
                self.commit(|state| {
                    state.enrollments.push(added);
                    state.enrollment.settle();
                });
                Ok(enrollment)
            }
            Err(e) => {
                let message = e.user_message("Enrollment failed");
                self.commit(|state| state.enrollment.fail(message));
                Err(e)
            }
        }
    }

    pub async fn get_featured_courses(&self, limit: u32) {
        match self.service.get_featured_courses(limit).await {
            Ok(courses) => self.commit(|state| state.featured = courses),
            Err(e) => error!("Failed to fetch featured courses: {e}"),
        }
    }

    pub async fn get_popular_courses(&self, limit: u32) {
        match self.service.get_popular_courses(limit).await {
            Ok(courses) => self.commit(|state| state.popular = courses),
            Err(e) => error!("Failed to fetch popular courses: {e}"),
        }
    }

    pub async fn get_categories(&self) {
        match self.service.get_categories().await {
            Ok(categories) => self.commit(|state| state.categories = categories),
            Err(e) => error!("Failed to fetch categories: {e}"),
        }
    }

    pub async fn load_lessons(&self, course_id: &str) {
        match self.service.get_course_lessons(course_id).await {
            Ok(mut lessons) => {
                lessons.sort_by_key(|l| l.order);
                self.commit(|state| state.lessons = lessons);
            }
            Err(e) => error!("Failed to fetch lessons for {course_id}: {e}"),
        }
    }

    pub async fn load_reviews(&self, course_id: &str, page: u32) {
        match self
            .service
            .get_course_reviews(course_id, page, REVIEWS_PER_PAGE)
            .await
        {
            Ok(response) => self.commit(|state| state.reviews = response.data),
            Err(e) => error!("Failed to fetch reviews for {course_id}: {e}"),
        }
    }

    pub async fn load_enrollments(&self, user_id: &str) {
        match self.service.get_user_enrollments(user_id).await {
            Ok(enrollments) => self.commit(|state| state.enrollments = enrollments),
            Err(e) => error!("Failed to fetch enrollments for {user_id}: {e}"),
        }
    }

    pub fn clear_current_course(&self) {
        self.commit(|state| {
            state.courses.clear_selected();
            state.detail = RequestStatus::default();
            state.lessons.clear();
            state.reviews.clear();
        });
    }

    pub fn clear_error(&self) {
        self.commit(|state| {
            state.courses.error = None;
            state.detail.error = None;
            state.enrollment.error = None;
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.commit(|state| state.courses.is_loading = loading);
    }
}
