mod catalog;
mod course_detail;
mod login;
mod profile;
mod register;

pub use catalog::CatalogPage;
pub use course_detail::CourseDetailPage;
pub use login::LoginPage;
pub use profile::ProfilePage;
pub use register::RegisterPage;
