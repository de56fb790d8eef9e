//! Salary change validation
//!
//! Pure, side-effect-free checks. The salary change service runs these
//! against the employee row it read inside its own write transaction, so the
//! validated "current" salary is the one the update applies to.

use rust_decimal::Decimal;

use super::policy::{SalaryPolicy, percent_change};
use crate::core::error::{DomainError, DomainResult};
use crate::db::models::Employee;

/// A proposed salary must be strictly positive.
pub fn validate_new_salary(new_salary: Decimal) -> DomainResult<()> {
    if new_salary <= Decimal::ZERO {
        return Err(DomainError::InvalidValue {
            field: "new_salary",
            value: new_salary.to_string(),
        });
    }
    Ok(())
}

/// Full validation gate for a salary change on an existing employee.
///
/// Order matters: value checks before identity checks before policy checks,
/// so the caller always gets the most fundamental failure first.
pub fn validate_change(
    employee: &Employee,
    new_salary: Decimal,
    policy: &SalaryPolicy,
) -> DomainResult<()> {
    validate_new_salary(new_salary)?;

    if !employee.is_active {
        return Err(DomainError::Inactive {
            entity: "employee",
            id: employee.id.clone(),
        });
    }

    if new_salary == employee.salary {
        return Err(DomainError::NoChange { salary: new_salary });
    }

    let percent = percent_change(employee.salary, new_salary);
    if !policy.contains(percent) {
        return Err(DomainError::OutOfPolicyRange {
            percent,
            min: policy.min_percent_change,
            max: policy.max_percent_change,
        });
    }

    Ok(())
}
