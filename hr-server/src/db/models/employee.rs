//! Employee Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee record
///
/// `salary` is only ever written by the salary change service; the update
/// payload deliberately has no salary field. Employees are soft-deleted via
/// `is_active` so salary history and audit references stay resolvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
    pub department_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    pub job_title: String,
    pub salary: Decimal,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub modified_at: i64,
}

fn default_true() -> bool {
    true
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub hire_date: NaiveDate,
    pub department_id: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    pub job_title: String,
    /// Initial salary; seeds the first salary record (previous = none)
    pub salary: Decimal,
    pub acting_user: String,
}

/// Update employee payload
///
/// No salary field here — salary mutations go through
/// `POST /api/employees/{id}/salary` and nowhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    pub acting_user: String,
}
