//! Domain models
//!
//! Plain serde structs stored as JSON values in redb tables, one file per
//! entity. Create/Update payloads live next to the model they produce.

pub mod department;
pub mod employee;
pub mod performance_review;
pub mod project;
pub mod salary_record;

pub use department::{Department, DepartmentCreate, DepartmentUpdate};
pub use employee::{Employee, EmployeeCreate, EmployeeUpdate};
pub use performance_review::{PerformanceReview, ReviewCreate};
pub use project::{Project, ProjectCreate, ProjectUpdate};
pub use salary_record::SalaryRecord;
