#![forbid(unsafe_code)]

pub mod error;
pub mod i18n;
pub mod model;
pub mod time;

pub use error::ValidationError;
pub use time::Clock;
