//! HR Server - employee records with an audited salary change pipeline
//!
//! # Architecture
//!
//! - **Storage** (`db`): embedded redb key-value store, single-writer ACID
//!   transactions
//! - **Salary** (`salary`): policy band, validation gate, the one and only
//!   salary mutation path
//! - **Audit** (`audit`): append-only SHA-256 hash-chained log, written in
//!   the same transaction as the data it describes
//! - **Personnel** (`personnel`): employee/department/project/review CRUD
//! - **Reports** (`reports`): read-only aggregates
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module layout
//!
//! ```text
//! hr-server/src/
//! ├── core/          # config, domain errors, state, server loop
//! ├── db/            # models + redb storage
//! ├── salary/        # policy, validation, change service
//! ├── audit/         # recorder, diff, hash chain
//! ├── personnel/     # CRUD workflows, hierarchy checks
//! ├── reports/       # derived read-only views
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # error envelope, logging, validation helpers
//! ```

pub mod api;
pub mod audit;
pub mod core;
pub mod db;
pub mod personnel;
pub mod reports;
pub mod salary;
pub mod utils;

pub use audit::AuditRecorder;
pub use core::{Config, DomainError, DomainResult, Server, ServerState};
pub use db::{HrStorage, StoreError};
pub use personnel::PersonnelService;
pub use reports::ReportService;
pub use salary::{SalaryPolicy, SalaryService};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};
