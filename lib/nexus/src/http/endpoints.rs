//! REST paths, relative to the configured base address.

pub mod auth {
    pub const LOGIN: &str = "/auth/login";
    pub const REGISTER: &str = "/auth/register";
    pub const REFRESH: &str = "/auth/refresh";
    pub const LOGOUT: &str = "/auth/logout";
    pub const PROFILE: &str = "/auth/profile";
}

pub mod users {
    pub fn profile(id: &str) -> String {
        format!("/users/{id}")
    }
}

pub mod courses {
    pub const BASE: &str = "/courses";
    pub const FEATURED: &str = "/courses/featured";
    pub const POPULAR: &str = "/courses/popular";

    pub fn detail(id: &str) -> String {
        format!("/courses/{id}")
    }

    pub fn lessons(id: &str) -> String {
        format!("/courses/{id}/lessons")
    }

    pub fn enroll(id: &str) -> String {
        format!("/courses/{id}/enroll")
    }

    pub fn reviews(id: &str) -> String {
        format!("/courses/{id}/reviews")
    }
}

pub mod enrollments {
    pub fn for_user(user_id: &str) -> String {
        format!("/enrollments/user/{user_id}")
    }
}

pub const CATEGORIES: &str = "/categories";

pub mod search {
    pub const COURSES: &str = "/search/courses";
}
