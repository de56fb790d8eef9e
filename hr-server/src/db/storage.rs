//! redb-based domain store
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `employees` | `employee_id` | `Employee` | Employee records |
//! | `departments` | `department_id` | `Department` | Department records |
//! | `projects` | `project_id` | `Project` | Project records |
//! | `performance_reviews` | `review_id` | `PerformanceReview` | Review records |
//! | `salary_records` | `(employee_id, sequence)` | `SalaryRecord` | Salary history (append-only) |
//! | `audit_log` | `sequence` | `AuditEntry` | Audit trail (append-only) |
//! | `sequence_counter` | counter name | `u64` | Salary/audit sequences |
//!
//! # Transactions
//!
//! redb allows a single write transaction at a time; `begin_write()` blocks
//! until the previous writer commits or drops. Every multi-table mutation
//! (salary change, employee create, ...) runs inside one `WriteTransaction`,
//! so the salary read, the employee update, the history append and the audit
//! append either all commit or all vanish. This is also what serializes
//! concurrent changes against the same employee: the second writer re-reads
//! the committed salary inside its own transaction.

use redb::{
    Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::audit::types::AuditEntry;
use crate::db::models::{Department, Employee, PerformanceReview, Project, SalaryRecord};

const EMPLOYEES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("employees");
const DEPARTMENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("departments");
const PROJECTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("projects");
const REVIEWS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("performance_reviews");

/// Salary history: key = (employee_id, sequence), value = JSON-serialized SalaryRecord
const SALARY_RECORDS_TABLE: TableDefinition<(&str, u64), &[u8]> =
    TableDefinition::new("salary_records");

/// Audit trail: key = sequence, value = JSON-serialized AuditEntry
const AUDIT_LOG_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("audit_log");

/// Sequence counters: key = counter name, value = last issued value
const SEQUENCE_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequence_counter");

const SALARY_SEQUENCE_KEY: &str = "salary_seq";
const AUDIT_SEQUENCE_KEY: &str = "audit_seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Domain store backed by redb
#[derive(Clone)]
pub struct HrStorage {
    db: Arc<Database>,
}

impl HrStorage {
    /// Open or create the database at the given path.
    ///
    /// redb commits with `Durability::Immediate`; the file is always in a
    /// consistent state even across power loss.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let storage = Self { db: Arc::new(db) };
        storage.init_tables()?;
        Ok(storage)
    }

    fn init_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(EMPLOYEES_TABLE)?;
            let _ = write_txn.open_table(DEPARTMENTS_TABLE)?;
            let _ = write_txn.open_table(PROJECTS_TABLE)?;
            let _ = write_txn.open_table(REVIEWS_TABLE)?;
            let _ = write_txn.open_table(SALARY_RECORDS_TABLE)?;
            let _ = write_txn.open_table(AUDIT_LOG_TABLE)?;

            let mut seq_table = write_txn.open_table(SEQUENCE_TABLE)?;
            if seq_table.get(SALARY_SEQUENCE_KEY)?.is_none() {
                seq_table.insert(SALARY_SEQUENCE_KEY, 0u64)?;
            }
            if seq_table.get(AUDIT_SEQUENCE_KEY)?.is_none() {
                seq_table.insert(AUDIT_SEQUENCE_KEY, 0u64)?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction. Blocks while another writer is active.
    pub fn begin_write(&self) -> StoreResult<WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    // ========== Sequence Operations ==========

    fn increment_sequence(&self, txn: &WriteTransaction, key: &str) -> StoreResult<u64> {
        let mut table = txn.open_table(SEQUENCE_TABLE)?;
        let current = table.get(key)?.map(|g| g.value()).unwrap_or(0);
        let next = current + 1;
        table.insert(key, next)?;
        Ok(next)
    }

    fn current_sequence(&self, txn: &WriteTransaction, key: &str) -> StoreResult<u64> {
        let table = txn.open_table(SEQUENCE_TABLE)?;
        Ok(table.get(key)?.map(|g| g.value()).unwrap_or(0))
    }

    /// Increment and return the salary record sequence.
    pub fn next_salary_sequence(&self, txn: &WriteTransaction) -> StoreResult<u64> {
        self.increment_sequence(txn, SALARY_SEQUENCE_KEY)
    }

    /// Increment and return the audit sequence.
    pub fn next_audit_sequence(&self, txn: &WriteTransaction) -> StoreResult<u64> {
        self.increment_sequence(txn, AUDIT_SEQUENCE_KEY)
    }

    // ========== Employee Operations ==========

    /// Insert or replace an employee (within transaction)
    pub fn put_employee(&self, txn: &WriteTransaction, employee: &Employee) -> StoreResult<()> {
        let mut table = txn.open_table(EMPLOYEES_TABLE)?;
        let value = serde_json::to_vec(employee)?;
        table.insert(employee.id.as_str(), value.as_slice())?;
        Ok(())
    }

    /// Get an employee by id (read snapshot)
    pub fn get_employee(&self, id: &str) -> StoreResult<Option<Employee>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EMPLOYEES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Get an employee by id (within transaction)
    pub fn get_employee_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Employee>> {
        let table = txn.open_table(EMPLOYEES_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All employees, sorted by last then first name.
    pub fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(EMPLOYEES_TABLE)?;

        let mut employees = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let employee: Employee = serde_json::from_slice(value.value())?;
            employees.push(employee);
        }
        employees.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(employees)
    }

    /// Whether any active employee reports to `manager_id` (within transaction).
    pub fn has_direct_reports_txn(
        &self,
        txn: &WriteTransaction,
        manager_id: &str,
    ) -> StoreResult<bool> {
        let table = txn.open_table(EMPLOYEES_TABLE)?;
        for result in table.iter()? {
            let (_key, value) = result?;
            let employee: Employee = serde_json::from_slice(value.value())?;
            if employee.is_active && employee.manager_id.as_deref() == Some(manager_id) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether another employee already uses this email, case-insensitive
    /// (within transaction).
    pub fn email_in_use_txn(
        &self,
        txn: &WriteTransaction,
        email: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<bool> {
        let table = txn.open_table(EMPLOYEES_TABLE)?;
        for result in table.iter()? {
            let (_key, value) = result?;
            let employee: Employee = serde_json::from_slice(value.value())?;
            if Some(employee.id.as_str()) == exclude_id {
                continue;
            }
            if employee.email.eq_ignore_ascii_case(email) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // ========== Department Operations ==========

    pub fn put_department(
        &self,
        txn: &WriteTransaction,
        department: &Department,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(DEPARTMENTS_TABLE)?;
        let value = serde_json::to_vec(department)?;
        table.insert(department.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_department(&self, id: &str) -> StoreResult<Option<Department>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DEPARTMENTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_department_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Department>> {
        let table = txn.open_table(DEPARTMENTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_departments(&self) -> StoreResult<Vec<Department>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(DEPARTMENTS_TABLE)?;

        let mut departments = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let department: Department = serde_json::from_slice(value.value())?;
            departments.push(department);
        }
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    pub fn remove_department(&self, txn: &WriteTransaction, id: &str) -> StoreResult<()> {
        let mut table = txn.open_table(DEPARTMENTS_TABLE)?;
        table.remove(id)?;
        Ok(())
    }

    /// Department headed by the given employee, if any (within transaction).
    pub fn department_headed_by_txn(
        &self,
        txn: &WriteTransaction,
        employee_id: &str,
    ) -> StoreResult<Option<Department>> {
        let table = txn.open_table(DEPARTMENTS_TABLE)?;
        for result in table.iter()? {
            let (_key, value) = result?;
            let department: Department = serde_json::from_slice(value.value())?;
            if department.head_id.as_deref() == Some(employee_id) {
                return Ok(Some(department));
            }
        }
        Ok(None)
    }

    /// Active employees assigned to a department (within transaction).
    pub fn department_in_use_txn(
        &self,
        txn: &WriteTransaction,
        department_id: &str,
    ) -> StoreResult<bool> {
        let employees = txn.open_table(EMPLOYEES_TABLE)?;
        for result in employees.iter()? {
            let (_key, value) = result?;
            let employee: Employee = serde_json::from_slice(value.value())?;
            if employee.is_active && employee.department_id == department_id {
                return Ok(true);
            }
        }
        let projects = txn.open_table(PROJECTS_TABLE)?;
        for result in projects.iter()? {
            let (_key, value) = result?;
            let project: Project = serde_json::from_slice(value.value())?;
            if project.department_id == department_id {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether another department already uses this name, case-insensitive
    /// (within transaction).
    pub fn department_name_taken_txn(
        &self,
        txn: &WriteTransaction,
        name: &str,
        exclude_id: Option<&str>,
    ) -> StoreResult<bool> {
        let table = txn.open_table(DEPARTMENTS_TABLE)?;
        for result in table.iter()? {
            let (_key, value) = result?;
            let department: Department = serde_json::from_slice(value.value())?;
            if Some(department.id.as_str()) == exclude_id {
                continue;
            }
            if department.name.eq_ignore_ascii_case(name) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // ========== Project Operations ==========

    pub fn put_project(&self, txn: &WriteTransaction, project: &Project) -> StoreResult<()> {
        let mut table = txn.open_table(PROJECTS_TABLE)?;
        let value = serde_json::to_vec(project)?;
        table.insert(project.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_project(&self, id: &str) -> StoreResult<Option<Project>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROJECTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_project_txn(
        &self,
        txn: &WriteTransaction,
        id: &str,
    ) -> StoreResult<Option<Project>> {
        let table = txn.open_table(PROJECTS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn list_projects(&self) -> StoreResult<Vec<Project>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROJECTS_TABLE)?;

        let mut projects = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let project: Project = serde_json::from_slice(value.value())?;
            projects.push(project);
        }
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    pub fn remove_project(&self, txn: &WriteTransaction, id: &str) -> StoreResult<()> {
        let mut table = txn.open_table(PROJECTS_TABLE)?;
        table.remove(id)?;
        Ok(())
    }

    // ========== Performance Review Operations ==========

    pub fn put_review(&self, txn: &WriteTransaction, review: &PerformanceReview) -> StoreResult<()> {
        let mut table = txn.open_table(REVIEWS_TABLE)?;
        let value = serde_json::to_vec(review)?;
        table.insert(review.id.as_str(), value.as_slice())?;
        Ok(())
    }

    pub fn get_review(&self, id: &str) -> StoreResult<Option<PerformanceReview>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVIEWS_TABLE)?;
        match table.get(id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All reviews, optionally filtered by employee, newest review date first.
    pub fn list_reviews(&self, employee_id: Option<&str>) -> StoreResult<Vec<PerformanceReview>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REVIEWS_TABLE)?;

        let mut reviews = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let review: PerformanceReview = serde_json::from_slice(value.value())?;
            if let Some(eid) = employee_id
                && review.employee_id != eid
            {
                continue;
            }
            reviews.push(review);
        }
        reviews.sort_by(|a, b| b.review_date.cmp(&a.review_date));
        Ok(reviews)
    }

    // ========== Salary History Operations ==========

    /// Append a salary record (within transaction). There is deliberately no
    /// update or remove counterpart.
    pub fn append_salary_record(
        &self,
        txn: &WriteTransaction,
        record: &SalaryRecord,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(SALARY_RECORDS_TABLE)?;
        let key = (record.employee_id.as_str(), record.sequence);
        let value = serde_json::to_vec(record)?;
        table.insert(key, value.as_slice())?;
        Ok(())
    }

    /// Salary history for one employee, newest first.
    pub fn salary_history(&self, employee_id: &str) -> StoreResult<Vec<SalaryRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SALARY_RECORDS_TABLE)?;

        let mut records = Vec::new();
        let range_start = (employee_id, 0u64);
        let range_end = (employee_id, u64::MAX);
        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            let record: SalaryRecord = serde_json::from_slice(value.value())?;
            records.push(record);
        }
        records.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        Ok(records)
    }

    /// Count of salary records for an employee (test/report helper).
    pub fn salary_record_count(&self, employee_id: &str) -> StoreResult<usize> {
        Ok(self.salary_history(employee_id)?.len())
    }

    // ========== Audit Operations ==========

    /// Append an audit entry at its sequence (within transaction).
    pub fn append_audit_entry(
        &self,
        txn: &WriteTransaction,
        entry: &AuditEntry,
    ) -> StoreResult<()> {
        let mut table = txn.open_table(AUDIT_LOG_TABLE)?;
        let value = serde_json::to_vec(entry)?;
        table.insert(entry.sequence, value.as_slice())?;
        Ok(())
    }

    /// Hash of the most recent audit entry, read via the sequence counter so
    /// the chain link is computed inside the same write transaction.
    pub fn last_audit_hash_txn(&self, txn: &WriteTransaction) -> StoreResult<Option<String>> {
        let last_seq = self.current_sequence(txn, AUDIT_SEQUENCE_KEY)?;
        if last_seq == 0 {
            return Ok(None);
        }
        let table = txn.open_table(AUDIT_LOG_TABLE)?;
        match table.get(last_seq)? {
            Some(value) => {
                let entry: AuditEntry = serde_json::from_slice(value.value())?;
                Ok(Some(entry.curr_hash))
            }
            None => Ok(None),
        }
    }

    /// All audit entries, ascending by sequence.
    pub fn all_audit_entries(&self) -> StoreResult<Vec<AuditEntry>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(AUDIT_LOG_TABLE)?;

        let mut entries = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let entry: AuditEntry = serde_json::from_slice(value.value())?;
            entries.push(entry);
        }
        entries.sort_by_key(|e| e.sequence);
        Ok(entries)
    }
}
