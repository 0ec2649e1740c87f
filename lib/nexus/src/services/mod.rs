mod auth;
mod course;

pub use auth::AuthService;
pub use course::{CourseService, DEFAULT_LIMIT, DEFAULT_PAGE, DEFAULT_SHOWCASE_LIMIT};
