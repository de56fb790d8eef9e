//! Salary change subsystem
//!
//! Policy band configuration, the validation gate, and the transactional
//! change service. All salary mutations in the system go through
//! [`SalaryService`]; employee update payloads carry no salary field.

pub mod policy;
pub mod service;
pub mod validate;

pub use policy::SalaryPolicy;
pub use service::{BatchItemOutcome, SalaryChange, SalaryService};
