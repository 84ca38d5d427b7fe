pub mod error;
pub mod health;
pub mod pages;
pub mod timeline;

pub use error::{AppError, RequestError};
