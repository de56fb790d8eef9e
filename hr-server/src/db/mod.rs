//! Database layer
//!
//! Embedded redb store plus the domain models persisted in it.

pub mod models;
pub mod storage;

pub use storage::{HrStorage, StoreError, StoreResult};
