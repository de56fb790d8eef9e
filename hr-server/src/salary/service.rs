//! Salary change service
//!
//! The only code path through which an employee's salary ever changes.
//!
//! # Change Flow
//!
//! ```text
//! change_salary(change)
//!     ├─ 1. Begin write transaction (serializes concurrent writers)
//!     ├─ 2. Read current employee inside the transaction
//!     ├─ 3. Validate (bounds, active, no-op, policy band, approver)
//!     ├─ 4. Update employee salary + modified_at
//!     ├─ 5. Append SalaryRecord (previous → new)
//!     ├─ 6. Append audit UPDATE entry (structured diff)
//!     ├─ 7. Commit — all three effects or none
//!     └─ 8. Return the new SalaryRecord
//! ```
//!
//! A validation failure drops the transaction un-committed; the store is
//! untouched. Batch adjustments run one transaction per item, so one bad
//! item never rolls back committed siblings.

use redb::WriteTransaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditAction, AuditRecorder, FieldChange};
use crate::core::error::{DomainError, DomainResult};
use crate::db::models::{Employee, SalaryRecord};
use crate::db::{HrStorage, StoreResult};
use shared::ErrorKind;
use shared::util::now_millis;

use super::policy::SalaryPolicy;
use super::validate;

/// A requested salary change for one employee.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryChange {
    pub employee_id: String,
    pub new_salary: Decimal,
    pub reason: String,
    #[serde(default)]
    pub approver_id: Option<String>,
    pub acting_user: String,
}

/// Per-item result of a batch adjustment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemOutcome {
    pub employee_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_record: Option<SalaryRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Orchestrates salary mutations: validate, apply, history, audit —
/// all-or-nothing.
#[derive(Clone)]
pub struct SalaryService {
    storage: HrStorage,
    recorder: AuditRecorder,
    policy: SalaryPolicy,
}

impl SalaryService {
    pub fn new(storage: HrStorage, recorder: AuditRecorder, policy: SalaryPolicy) -> Self {
        Self {
            storage,
            recorder,
            policy,
        }
    }

    pub fn policy(&self) -> &SalaryPolicy {
        &self.policy
    }

    /// Apply one salary change atomically.
    pub fn change_salary(&self, change: &SalaryChange) -> DomainResult<SalaryRecord> {
        let txn = self.storage.begin_write()?;

        let mut employee = self
            .storage
            .get_employee_txn(&txn, &change.employee_id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "employee",
                id: change.employee_id.clone(),
            })?;

        validate::validate_change(&employee, change.new_salary, &self.policy)?;
        crate::utils::validation::validate_required_text(
            &change.reason,
            "reason",
            crate::utils::validation::MAX_NOTE_LEN,
        )?;
        if let Some(ref approver_id) = change.approver_id {
            self.check_approver(&txn, approver_id)?;
        }

        let previous = employee.salary;
        let now = now_millis();
        employee.salary = change.new_salary;
        employee.modified_at = now;
        self.storage.put_employee(&txn, &employee)?;

        let record = self.append_record(
            &txn,
            &employee,
            Some(previous),
            change.new_salary,
            &change.reason,
            change.approver_id.clone(),
            &change.acting_user,
        )?;

        let changes = vec![FieldChange {
            field: "salary".to_string(),
            from: serde_json::to_value(previous).map_err(crate::db::StoreError::from)?,
            to: serde_json::to_value(change.new_salary).map_err(crate::db::StoreError::from)?,
        }];
        self.recorder.record(
            &txn,
            "employee",
            &employee.id,
            AuditAction::Update,
            changes,
            &change.acting_user,
        )?;

        txn.commit().map_err(crate::db::StoreError::from)?;

        tracing::info!(
            employee_id = %record.employee_id,
            previous = %previous,
            new = %record.new_salary,
            actor = %change.acting_user,
            "Salary changed"
        );
        Ok(record)
    }

    /// Seed the first salary record for a freshly created employee, inside
    /// the creation transaction. No prior value exists, so the policy band
    /// check does not apply — but the amount must still be positive.
    pub fn initial_record(
        &self,
        txn: &WriteTransaction,
        employee: &Employee,
        acting_user: &str,
    ) -> DomainResult<SalaryRecord> {
        validate::validate_new_salary(employee.salary)?;
        Ok(self.append_record(
            txn,
            employee,
            None,
            employee.salary,
            "Initial salary",
            None,
            acting_user,
        )?)
    }

    /// Apply a batch of adjustments, one transaction per item.
    ///
    /// Failures are collected per item; a failed item never affects a
    /// committed sibling.
    pub fn change_salaries(&self, items: &[SalaryChange]) -> Vec<BatchItemOutcome> {
        items
            .iter()
            .map(|item| match self.change_salary(item) {
                Ok(record) => BatchItemOutcome {
                    employee_id: item.employee_id.clone(),
                    success: true,
                    salary_record: Some(record),
                    error_kind: None,
                    message: None,
                    details: None,
                },
                Err(err) => {
                    tracing::warn!(
                        employee_id = %item.employee_id,
                        kind = %err.kind(),
                        "Batch salary adjustment item rejected: {err}"
                    );
                    BatchItemOutcome {
                        employee_id: item.employee_id.clone(),
                        success: false,
                        salary_record: None,
                        error_kind: Some(err.kind()),
                        message: Some(err.to_string()),
                        details: err.details(),
                    }
                }
            })
            .collect()
    }

    /// Salary history for one employee, newest first.
    pub fn history(&self, employee_id: &str) -> DomainResult<Vec<SalaryRecord>> {
        if self.storage.get_employee(employee_id)?.is_none() {
            return Err(DomainError::NotFound {
                entity: "employee",
                id: employee_id.to_string(),
            });
        }
        Ok(self.storage.salary_history(employee_id)?)
    }

    fn check_approver(&self, txn: &WriteTransaction, approver_id: &str) -> DomainResult<()> {
        match self.storage.get_employee_txn(txn, approver_id)? {
            Some(approver) if approver.is_active => Ok(()),
            _ => Err(DomainError::InvalidReference {
                field: "approver_id",
                id: approver_id.to_string(),
            }),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn append_record(
        &self,
        txn: &WriteTransaction,
        employee: &Employee,
        previous_salary: Option<Decimal>,
        new_salary: Decimal,
        reason: &str,
        approver_id: Option<String>,
        acting_user: &str,
    ) -> StoreResult<SalaryRecord> {
        let sequence = self.storage.next_salary_sequence(txn)?;
        let record = SalaryRecord {
            id: uuid::Uuid::new_v4().to_string(),
            employee_id: employee.id.clone(),
            sequence,
            previous_salary,
            new_salary,
            changed_at: now_millis(),
            reason: reason.to_string(),
            approver_id,
            changed_by: acting_user.to_string(),
        };
        self.storage.append_salary_record(txn, &record)?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (SalaryService, HrStorage) {
        let storage = HrStorage::open_in_memory().unwrap();
        let recorder = AuditRecorder::new(storage.clone());
        let service = SalaryService::new(storage.clone(), recorder, SalaryPolicy::default());
        (service, storage)
    }

    fn seed_employee(storage: &HrStorage, id: &str, salary: i64, is_active: bool) {
        let employee = Employee {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: id.to_string(),
            email: format!("{id}@example.com"),
            phone: None,
            hire_date: chrono::NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            department_id: "dep-1".to_string(),
            manager_id: None,
            job_title: "Engineer".to_string(),
            salary: Decimal::from(salary),
            is_active,
            created_at: now_millis(),
            modified_at: now_millis(),
        };
        let txn = storage.begin_write().unwrap();
        storage.put_employee(&txn, &employee).unwrap();
        txn.commit().unwrap();
    }

    fn change(employee_id: &str, new_salary: i64) -> SalaryChange {
        SalaryChange {
            employee_id: employee_id.to_string(),
            new_salary: Decimal::from(new_salary),
            reason: "promotion".to_string(),
            approver_id: None,
            acting_user: "hr-admin".to_string(),
        }
    }

    #[test]
    fn successful_change_applies_history_and_audit_together() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 80_000, true);

        let record = service.change_salary(&change("emp-1", 90_000)).unwrap();

        assert_eq!(record.previous_salary, Some(Decimal::from(80_000)));
        assert_eq!(record.new_salary, Decimal::from(90_000));

        let employee = storage.get_employee("emp-1").unwrap().unwrap();
        assert_eq!(employee.salary, Decimal::from(90_000));

        // exactly one history record and one audit entry
        assert_eq!(storage.salary_record_count("emp-1").unwrap(), 1);
        let audit = storage.all_audit_entries().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].action, AuditAction::Update);
        assert_eq!(audit[0].record_id, "emp-1");
        assert_eq!(audit[0].actor, "hr-admin");
        assert_eq!(audit[0].changes.len(), 1);
        assert_eq!(audit[0].changes[0].field, "salary");
    }

    #[test]
    fn rejected_change_leaves_no_partial_state() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 90_000, true);

        // 150% increase — far outside the band
        let err = service.change_salary(&change("emp-1", 200_000)).unwrap_err();
        assert!(matches!(err, DomainError::OutOfPolicyRange { .. }));

        let employee = storage.get_employee("emp-1").unwrap().unwrap();
        assert_eq!(employee.salary, Decimal::from(90_000));
        assert_eq!(storage.salary_record_count("emp-1").unwrap(), 0);
        assert!(storage.all_audit_entries().unwrap().is_empty());
    }

    #[test]
    fn no_op_change_is_rejected_every_time() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 80_000, true);

        let err = service.change_salary(&change("emp-1", 80_000)).unwrap_err();
        assert!(matches!(err, DomainError::NoChange { .. }));
        assert_eq!(storage.salary_record_count("emp-1").unwrap(), 0);
    }

    #[test]
    fn missing_and_inactive_employees_are_rejected() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-gone", 50_000, false);

        assert!(matches!(
            service.change_salary(&change("nobody", 60_000)).unwrap_err(),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            service.change_salary(&change("emp-gone", 60_000)).unwrap_err(),
            DomainError::Inactive { .. }
        ));
    }

    #[test]
    fn approver_must_be_an_active_employee() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 80_000, true);
        seed_employee(&storage, "mgr-inactive", 120_000, false);
        seed_employee(&storage, "mgr-1", 120_000, true);

        let mut req = change("emp-1", 90_000);
        req.approver_id = Some("ghost".to_string());
        assert!(matches!(
            service.change_salary(&req).unwrap_err(),
            DomainError::InvalidReference { .. }
        ));

        req.approver_id = Some("mgr-inactive".to_string());
        assert!(matches!(
            service.change_salary(&req).unwrap_err(),
            DomainError::InvalidReference { .. }
        ));

        req.approver_id = Some("mgr-1".to_string());
        let record = service.change_salary(&req).unwrap();
        assert_eq!(record.approver_id.as_deref(), Some("mgr-1"));
    }

    #[test]
    fn band_boundaries_hold_end_to_end() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 10_000, true);

        // +50.01% rejected, store untouched
        assert!(matches!(
            service.change_salary(&change("emp-1", 15_001)).unwrap_err(),
            DomainError::OutOfPolicyRange { .. }
        ));
        // exactly +50% commits
        service.change_salary(&change("emp-1", 15_000)).unwrap();
        assert_eq!(
            storage.get_employee("emp-1").unwrap().unwrap().salary,
            Decimal::from(15_000)
        );
    }

    #[test]
    fn promotion_walkthrough() {
        let (service, storage) = service();
        seed_employee(&storage, "E1", 80_000, true);
        seed_employee(&storage, "M1", 150_000, true);

        let mut req = change("E1", 90_000);
        req.approver_id = Some("M1".to_string());
        let record = service.change_salary(&req).unwrap();
        assert_eq!(record.previous_salary, Some(Decimal::from(80_000)));
        assert_eq!(record.new_salary, Decimal::from(90_000));

        // same value again is a no-op
        assert!(matches!(
            service.change_salary(&change("E1", 90_000)).unwrap_err(),
            DomainError::NoChange { .. }
        ));

        // 90k -> 200k is a 122% raise
        let err = service.change_salary(&change("E1", 200_000)).unwrap_err();
        match err {
            DomainError::OutOfPolicyRange { percent, .. } => {
                assert!(percent > Decimal::from(100));
            }
            other => panic!("expected OutOfPolicyRange, got {other:?}"),
        }
        assert_eq!(
            storage.get_employee("E1").unwrap().unwrap().salary,
            Decimal::from(90_000)
        );
        assert_eq!(storage.salary_record_count("E1").unwrap(), 1);
    }

    #[test]
    fn batch_failures_do_not_roll_back_committed_siblings() {
        let (service, storage) = service();
        seed_employee(&storage, "E1", 90_000, true);
        seed_employee(&storage, "E2", 50_000, true);

        let mut bad = change("E2", 0);
        bad.new_salary = Decimal::from(-5);
        let outcomes = service.change_salaries(&[change("E1", 95_000), bad]);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].success);
        assert!(!outcomes[1].success);
        assert_eq!(outcomes[1].error_kind, Some(ErrorKind::InvalidValue));

        // E1 committed even though E2 failed
        assert_eq!(
            storage.get_employee("E1").unwrap().unwrap().salary,
            Decimal::from(95_000)
        );
        assert_eq!(
            storage.get_employee("E2").unwrap().unwrap().salary,
            Decimal::from(50_000)
        );
    }

    #[test]
    fn concurrent_changes_on_one_employee_serialize() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 80_000, true);

        let mut handles = Vec::new();
        for target in [90_000i64, 85_000] {
            let service = service.clone();
            handles.push(std::thread::spawn(move || {
                service.change_salary(&change("emp-1", target))
            }));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Both validated against a committed salary: either both succeed in
        // sequence or the loser failed cleanly; history never under-counts.
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(storage.salary_record_count("emp-1").unwrap(), successes);
        assert!(successes >= 1);

        let employee = storage.get_employee("emp-1").unwrap().unwrap();
        let history = storage.salary_history("emp-1").unwrap();
        assert_eq!(employee.salary, history[0].new_salary);
    }

    #[test]
    fn initial_record_has_no_previous_salary() {
        let (service, storage) = service();
        seed_employee(&storage, "emp-1", 70_000, true);
        let employee = storage.get_employee("emp-1").unwrap().unwrap();

        let txn = storage.begin_write().unwrap();
        let record = service.initial_record(&txn, &employee, "hr-admin").unwrap();
        txn.commit().unwrap();

        assert_eq!(record.previous_salary, None);
        assert_eq!(record.new_salary, Decimal::from(70_000));
        assert_eq!(record.reason, "Initial salary");
    }

    #[test]
    fn history_is_newest_first() {
        let (service, _storage) = service();
        seed_employee(&_storage, "emp-1", 10_000, true);

        service.change_salary(&change("emp-1", 11_000)).unwrap();
        service.change_salary(&change("emp-1", 12_000)).unwrap();

        let history = service.history("emp-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].new_salary, Decimal::from(12_000));
        assert_eq!(history[1].new_salary, Decimal::from(11_000));

        assert!(matches!(
            service.history("nobody").unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
