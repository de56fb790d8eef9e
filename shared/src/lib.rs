//! Shared types for the HR server
//!
//! Common types used across crates: error kinds, pagination envelope,
//! and time utilities.

pub mod error;
pub mod response;
pub mod util;

// Re-exports
pub use error::ErrorKind;
pub use response::Paginated;
