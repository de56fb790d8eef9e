//! Reporting module
//!
//! Derived, read-only views over the store. Nothing here writes.

pub mod service;

pub use service::{DepartmentSummary, PerformanceQuery, PerformanceRanking, ReportService};
