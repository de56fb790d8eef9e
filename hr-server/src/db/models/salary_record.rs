//! Salary Record Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One realized salary transition. Append-only — no update or delete path
/// exists anywhere in the crate.
///
/// `previous_salary` is `None` only for the initial record written when the
/// employee is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub id: String,
    pub employee_id: String,
    /// Employee-scoped ordering comes from the global `sequence`, which is
    /// strictly increasing across all records.
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_salary: Option<Decimal>,
    pub new_salary: Decimal,
    /// Unix millis
    pub changed_at: i64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<String>,
    /// Who performed the change (explicit, never ambient)
    pub changed_by: String,
}
