use chrono::{DateTime, Utc};

mod card;
mod lessons;
mod pager;
mod search_bar;

pub use card::CourseCard;
pub use lessons::{LessonList, ReviewList};
pub use pager::PageControls;
pub use search_bar::SearchBar;

/// "1h 30m" style duration from minutes.
pub fn format_duration(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

pub fn format_price(price: f64) -> String {
    if price <= 0.0 {
        "Free".to_string()
    } else {
        format!("${price:.2}")
    }
}

/// "Jan 15, 2024"
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %d, %Y").to_string()
}
