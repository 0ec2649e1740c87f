use serde_json::Value;
use shared::course::{Course, CourseFilters, Enrollment, Lesson, Review};
use shared::envelope::{ApiResponse, PaginatedResponse};
use tracing::error;

use crate::error::Result;
use crate::http::{endpoints, ApiClient};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 12;
pub const DEFAULT_SHOWCASE_LIMIT: u32 = 6;

/// Stateless catalog facade: request/response mapping only, no caching.
#[derive(Clone)]
pub struct CourseService {
    client: ApiClient,
}

impl CourseService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_courses(
        &self,
        page: u32,
        limit: u32,
        filters: &CourseFilters,
    ) -> Result<PaginatedResponse<Course>> {
        let mut query = page_query(page, limit);
        query.extend(filters.query_pairs(true));

        self.client
            .get(endpoints::courses::BASE, query)
            .await
            .inspect_err(|e| error!("Get courses error: {e}"))
    }

    pub async fn get_course_by_id(&self, id: &str) -> Result<Course> {
        self.client
            .get::<ApiResponse<Course>>(&endpoints::courses::detail(id), Vec::new())
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Get course by ID error: {e}"))
    }

    pub async fn get_course_lessons(&self, course_id: &str) -> Result<Vec<Lesson>> {
        self.client
            .get::<ApiResponse<Vec<Lesson>>>(&endpoints::courses::lessons(course_id), Vec::new())
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Get course lessons error: {e}"))
    }

    pub async fn enroll_in_course(&self, course_id: &str) -> Result<Enrollment> {
        self.client
            .post::<ApiResponse<Enrollment>, Value>(&endpoints::courses::enroll(course_id), None)
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Enroll in course error: {e}"))
    }

    pub async fn get_course_reviews(
        &self,
        course_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<PaginatedResponse<Review>> {
        self.client
            .get(&endpoints::courses::reviews(course_id), page_query(page, limit))
            .await
            .inspect_err(|e| error!("Get course reviews error: {e}"))
    }

    pub async fn search_courses(&self, query: &str, filters: &CourseFilters) -> Result<Vec<Course>> {
        let mut params = vec![("q".to_string(), query.to_string())];
        params.extend(filters.query_pairs(false));

        self.client
            .get::<ApiResponse<Vec<Course>>>(endpoints::search::COURSES, params)
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Search courses error: {e}"))
    }

    pub async fn get_featured_courses(&self, limit: u32) -> Result<Vec<Course>> {
        self.client
            .get::<ApiResponse<Vec<Course>>>(endpoints::courses::FEATURED, limit_query(limit))
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Get featured courses error: {e}"))
    }

    pub async fn get_popular_courses(&self, limit: u32) -> Result<Vec<Course>> {
        self.client
            .get::<ApiResponse<Vec<Course>>>(endpoints::courses::POPULAR, limit_query(limit))
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Get popular courses error: {e}"))
    }

    pub async fn get_user_enrollments(&self, user_id: &str) -> Result<Vec<Enrollment>> {
        let path = endpoints::enrollments::for_user(user_id);
        self.client
            .get::<ApiResponse<Vec<Enrollment>>>(&path, Vec::new())
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Get user enrollments error: {e}"))
    }

    pub async fn get_categories(&self) -> Result<Vec<String>> {
        self.client
            .get::<ApiResponse<Vec<String>>>(endpoints::CATEGORIES, Vec::new())
            .await
            .map(|r| r.data)
            .inspect_err(|e| error!("Get categories error: {e}"))
    }
}

fn page_query(page: u32, limit: u32) -> Vec<(String, String)> {
    vec![
        ("page".to_string(), page.to_string()),
        ("limit".to_string(), limit.to_string()),
    ]
}

fn limit_query(limit: u32) -> Vec<(String, String)> {
    vec![("limit".to_string(), limit.to_string())]
}
