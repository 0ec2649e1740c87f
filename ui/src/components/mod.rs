pub mod catalog;
pub mod forms;
pub mod simple;

mod footer;

pub use catalog::*;
pub use footer::Footer;
pub use forms::*;
pub use simple::*;
