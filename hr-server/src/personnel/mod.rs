//! Personnel module
//!
//! Employee, department, project and review workflows, plus management
//! hierarchy checks. Mutations here audit themselves in-transaction.

pub mod hierarchy;
pub mod service;

pub use service::PersonnelService;
