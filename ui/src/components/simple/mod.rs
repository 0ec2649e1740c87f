mod alert;
mod button;
mod field;

pub use alert::{ErrorBanner, Spinner, SuccessBanner};
pub use button::{Button, ButtonVariant};
pub use field::TextField;
