//! Shared utilities: API error envelope, logging setup, input validation.

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResult};
