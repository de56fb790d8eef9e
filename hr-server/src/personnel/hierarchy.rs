//! Management hierarchy checks
//!
//! Assigning a manager must never create a reporting cycle. The walk runs
//! inside the caller's write transaction so it sees the same snapshot the
//! update will commit against.

use redb::WriteTransaction;

use crate::core::error::{DomainError, DomainResult};
use crate::db::HrStorage;

/// Hard cap on the manager chain walk. A chain deeper than this is treated
/// as cyclic rather than walked forever.
const MAX_CHAIN_DEPTH: usize = 64;

/// Reject `manager_id` for `employee_id` if the chain above the manager
/// leads back to the employee (or never terminates).
pub fn check_manager_assignment(
    storage: &HrStorage,
    txn: &WriteTransaction,
    employee_id: &str,
    manager_id: &str,
) -> DomainResult<()> {
    if manager_id == employee_id {
        return Err(DomainError::CyclicManagement {
            employee_id: employee_id.to_string(),
        });
    }

    let mut current = manager_id.to_string();
    for _ in 0..MAX_CHAIN_DEPTH {
        let Some(employee) = storage.get_employee_txn(txn, &current)? else {
            // Dangling manager reference higher up; not a cycle
            return Ok(());
        };
        match employee.manager_id {
            Some(next) if next == employee_id => {
                return Err(DomainError::CyclicManagement {
                    employee_id: employee_id.to_string(),
                });
            }
            Some(next) => current = next,
            None => return Ok(()),
        }
    }

    Err(DomainError::CyclicManagement {
        employee_id: employee_id.to_string(),
    })
}
