//! Audit trail module
//!
//! # Guarantees
//!
//! - **Append-only**: no update/delete interface exists
//! - **Transactional**: entries are written inside the mutating transaction;
//!   if the audit write fails, the mutation rolls back with it
//! - **SHA-256 hash chain**: every entry links to the previous one;
//!   `verify_chain` reports breaks
//! - **Structured diffs**: `{field, from, to}` lists, never delimited strings

pub mod diff;
pub mod recorder;
pub mod types;

pub use diff::{FieldChange, diff_entities};
pub use recorder::AuditRecorder;
pub use types::{AuditAction, AuditEntry, AuditQuery, ChainBreak, ChainVerification};
