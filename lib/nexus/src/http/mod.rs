mod client;
pub mod endpoints;
mod transport;

pub use client::{ApiClient, SessionEvent};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
