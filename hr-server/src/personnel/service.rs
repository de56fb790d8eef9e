//! Personnel workflows
//!
//! CRUD for employees, departments, projects and performance reviews. Every
//! mutation commits its audit entry in the same transaction as the data
//! change. Employee salary is out of scope here: creation seeds the first
//! salary record through the salary service, and the update payload carries
//! no salary field at all.

use redb::WriteTransaction;

use crate::audit::{AuditAction, AuditRecorder, diff_entities};
use crate::core::error::{DomainError, DomainResult};
use crate::db::models::{
    Department, DepartmentCreate, DepartmentUpdate, Employee, EmployeeCreate, EmployeeUpdate,
    PerformanceReview, Project, ProjectCreate, ProjectUpdate, ReviewCreate,
};
use crate::db::{HrStorage, StoreError};
use crate::salary::SalaryService;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TITLE_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use shared::util::now_millis;

use super::hierarchy;

#[derive(Clone)]
pub struct PersonnelService {
    storage: HrStorage,
    recorder: AuditRecorder,
    salary: SalaryService,
}

impl PersonnelService {
    pub fn new(storage: HrStorage, recorder: AuditRecorder, salary: SalaryService) -> Self {
        Self {
            storage,
            recorder,
            salary,
        }
    }

    // ========== Employees ==========

    /// Create an employee, seed the first salary record and audit the
    /// insert, all in one transaction.
    pub fn create_employee(&self, payload: &EmployeeCreate) -> DomainResult<Employee> {
        validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
        validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
        validate_required_text(&payload.job_title, "job_title", MAX_TITLE_LEN)?;
        validate_email(&payload.email)?;
        validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        if payload.hire_date > shared::util::today() {
            return Err(DomainError::InvalidValue {
                field: "hire_date",
                value: payload.hire_date.to_string(),
            });
        }
        crate::salary::validate::validate_new_salary(payload.salary)?;

        let txn = self.storage.begin_write()?;

        if self
            .storage
            .email_in_use_txn(&txn, &payload.email, None)?
        {
            return Err(DomainError::Conflict(format!(
                "email already in use: {}",
                payload.email
            )));
        }
        self.check_department_ref(&txn, &payload.department_id)?;
        if let Some(ref manager_id) = payload.manager_id {
            self.check_employee_ref(&txn, "manager_id", manager_id)?;
        }

        let now = now_millis();
        let employee = Employee {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone.clone(),
            hire_date: payload.hire_date,
            department_id: payload.department_id.clone(),
            manager_id: payload.manager_id.clone(),
            job_title: payload.job_title.trim().to_string(),
            salary: payload.salary,
            is_active: true,
            created_at: now,
            modified_at: now,
        };
        self.storage.put_employee(&txn, &employee)?;
        self.salary
            .initial_record(&txn, &employee, &payload.acting_user)?;
        self.recorder.record(
            &txn,
            "employee",
            &employee.id,
            AuditAction::Insert,
            diff_entities("employee", None, Some(&employee)),
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;

        tracing::info!(employee_id = %employee.id, actor = %payload.acting_user, "Employee created");
        Ok(employee)
    }

    pub fn get_employee(&self, id: &str) -> DomainResult<Employee> {
        self.storage
            .get_employee(id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "employee",
                id: id.to_string(),
            })
    }

    pub fn list_employees(&self) -> DomainResult<Vec<Employee>> {
        Ok(self.storage.list_employees()?)
    }

    /// Update non-salary employee fields; the audit entry records the exact
    /// field diff. A payload that changes nothing commits nothing.
    pub fn update_employee(&self, id: &str, payload: &EmployeeUpdate) -> DomainResult<Employee> {
        let txn = self.storage.begin_write()?;

        let before = self
            .storage
            .get_employee_txn(&txn, id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "employee",
                id: id.to_string(),
            })?;
        if !before.is_active {
            return Err(DomainError::Inactive {
                entity: "employee",
                id: id.to_string(),
            });
        }

        let mut after = before.clone();
        if let Some(ref first_name) = payload.first_name {
            validate_required_text(first_name, "first_name", MAX_NAME_LEN)?;
            after.first_name = first_name.trim().to_string();
        }
        if let Some(ref last_name) = payload.last_name {
            validate_required_text(last_name, "last_name", MAX_NAME_LEN)?;
            after.last_name = last_name.trim().to_string();
        }
        if let Some(ref email) = payload.email {
            validate_email(email)?;
            if self.storage.email_in_use_txn(&txn, email, Some(id))? {
                return Err(DomainError::Conflict(format!("email already in use: {email}")));
            }
            after.email = email.trim().to_string();
        }
        if let Some(ref phone) = payload.phone {
            validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
            after.phone = Some(phone.clone());
        }
        if let Some(ref department_id) = payload.department_id {
            self.check_department_ref(&txn, department_id)?;
            after.department_id = department_id.clone();
        }
        if let Some(ref manager_id) = payload.manager_id {
            self.check_employee_ref(&txn, "manager_id", manager_id)?;
            hierarchy::check_manager_assignment(&self.storage, &txn, id, manager_id)?;
            after.manager_id = Some(manager_id.clone());
        }
        if let Some(ref job_title) = payload.job_title {
            validate_required_text(job_title, "job_title", MAX_TITLE_LEN)?;
            after.job_title = job_title.trim().to_string();
        }

        let changes = diff_entities("employee", Some(&before), Some(&after));
        if changes.is_empty() {
            return Ok(before);
        }

        after.modified_at = now_millis();
        self.storage.put_employee(&txn, &after)?;
        self.recorder.record(
            &txn,
            "employee",
            id,
            AuditAction::Update,
            changes,
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(after)
    }

    /// Soft delete. The row stays so salary history and audit references
    /// resolve; blocked while the employee still manages people or heads a
    /// department.
    pub fn deactivate_employee(&self, id: &str, acting_user: &str) -> DomainResult<Employee> {
        let txn = self.storage.begin_write()?;

        let mut employee = self
            .storage
            .get_employee_txn(&txn, id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "employee",
                id: id.to_string(),
            })?;
        if !employee.is_active {
            return Err(DomainError::Inactive {
                entity: "employee",
                id: id.to_string(),
            });
        }
        if self.storage.has_direct_reports_txn(&txn, id)? {
            return Err(DomainError::Conflict(format!(
                "employee {id} still has direct reports"
            )));
        }
        if let Some(department) = self.storage.department_headed_by_txn(&txn, id)? {
            return Err(DomainError::Conflict(format!(
                "employee {id} still heads department {}",
                department.name
            )));
        }

        let before = employee.clone();
        employee.is_active = false;
        employee.modified_at = now_millis();
        self.storage.put_employee(&txn, &employee)?;
        self.recorder.record(
            &txn,
            "employee",
            id,
            AuditAction::Delete,
            diff_entities("employee", Some(&before), Some(&employee)),
            acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;

        tracing::info!(employee_id = %id, actor = %acting_user, "Employee deactivated");
        Ok(employee)
    }

    // ========== Departments ==========

    pub fn create_department(&self, payload: &DepartmentCreate) -> DomainResult<Department> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;

        let txn = self.storage.begin_write()?;
        if self
            .storage
            .department_name_taken_txn(&txn, &payload.name, None)?
        {
            return Err(DomainError::Conflict(format!(
                "department name already in use: {}",
                payload.name
            )));
        }
        if let Some(ref head_id) = payload.head_id {
            self.check_employee_ref(&txn, "head_id", head_id)?;
        }

        let now = now_millis();
        let department = Department {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            head_id: payload.head_id.clone(),
            budget: payload.budget,
            location: payload.location.clone(),
            created_at: now,
            modified_at: now,
        };
        self.storage.put_department(&txn, &department)?;
        self.recorder.record(
            &txn,
            "department",
            &department.id,
            AuditAction::Insert,
            diff_entities("department", None, Some(&department)),
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(department)
    }

    pub fn get_department(&self, id: &str) -> DomainResult<Department> {
        self.storage
            .get_department(id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "department",
                id: id.to_string(),
            })
    }

    pub fn list_departments(&self) -> DomainResult<Vec<Department>> {
        Ok(self.storage.list_departments()?)
    }

    pub fn update_department(
        &self,
        id: &str,
        payload: &DepartmentUpdate,
    ) -> DomainResult<Department> {
        let txn = self.storage.begin_write()?;

        let before = self
            .storage
            .get_department_txn(&txn, id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "department",
                id: id.to_string(),
            })?;

        let mut after = before.clone();
        if let Some(ref name) = payload.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
            if self.storage.department_name_taken_txn(&txn, name, Some(id))? {
                return Err(DomainError::Conflict(format!(
                    "department name already in use: {name}"
                )));
            }
            after.name = name.trim().to_string();
        }
        if let Some(ref head_id) = payload.head_id {
            self.check_employee_ref(&txn, "head_id", head_id)?;
            after.head_id = Some(head_id.clone());
        }
        if let Some(budget) = payload.budget {
            after.budget = Some(budget);
        }
        if let Some(ref location) = payload.location {
            after.location = Some(location.clone());
        }

        let changes = diff_entities("department", Some(&before), Some(&after));
        if changes.is_empty() {
            return Ok(before);
        }

        after.modified_at = now_millis();
        self.storage.put_department(&txn, &after)?;
        self.recorder.record(
            &txn,
            "department",
            id,
            AuditAction::Update,
            changes,
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(after)
    }

    /// Hard delete; blocked while active employees or projects still
    /// reference the department.
    pub fn delete_department(&self, id: &str, acting_user: &str) -> DomainResult<()> {
        let txn = self.storage.begin_write()?;

        let department = self
            .storage
            .get_department_txn(&txn, id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "department",
                id: id.to_string(),
            })?;
        if self.storage.department_in_use_txn(&txn, id)? {
            return Err(DomainError::Conflict(format!(
                "department {} is still in use",
                department.name
            )));
        }

        self.storage.remove_department(&txn, id)?;
        self.recorder.record(
            &txn,
            "department",
            id,
            AuditAction::Delete,
            diff_entities("department", Some(&department), None),
            acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(())
    }

    // ========== Projects ==========

    pub fn create_project(&self, payload: &ProjectCreate) -> DomainResult<Project> {
        validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
        check_date_order(payload.start_date, payload.end_date)?;

        let txn = self.storage.begin_write()?;
        self.check_department_ref(&txn, &payload.department_id)?;

        let now = now_millis();
        let project = Project {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            department_id: payload.department_id.clone(),
            budget: payload.budget,
            start_date: payload.start_date,
            end_date: payload.end_date,
            created_at: now,
            modified_at: now,
        };
        self.storage.put_project(&txn, &project)?;
        self.recorder.record(
            &txn,
            "project",
            &project.id,
            AuditAction::Insert,
            diff_entities("project", None, Some(&project)),
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(project)
    }

    pub fn get_project(&self, id: &str) -> DomainResult<Project> {
        self.storage
            .get_project(id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "project",
                id: id.to_string(),
            })
    }

    pub fn list_projects(&self) -> DomainResult<Vec<Project>> {
        Ok(self.storage.list_projects()?)
    }

    pub fn update_project(&self, id: &str, payload: &ProjectUpdate) -> DomainResult<Project> {
        let txn = self.storage.begin_write()?;

        let before = self
            .storage
            .get_project_txn(&txn, id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "project",
                id: id.to_string(),
            })?;

        let mut after = before.clone();
        if let Some(ref name) = payload.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
            after.name = name.trim().to_string();
        }
        if let Some(ref department_id) = payload.department_id {
            self.check_department_ref(&txn, department_id)?;
            after.department_id = department_id.clone();
        }
        if let Some(budget) = payload.budget {
            after.budget = Some(budget);
        }
        if let Some(start_date) = payload.start_date {
            after.start_date = Some(start_date);
        }
        if let Some(end_date) = payload.end_date {
            after.end_date = Some(end_date);
        }
        check_date_order(after.start_date, after.end_date)?;

        let changes = diff_entities("project", Some(&before), Some(&after));
        if changes.is_empty() {
            return Ok(before);
        }

        after.modified_at = now_millis();
        self.storage.put_project(&txn, &after)?;
        self.recorder.record(
            &txn,
            "project",
            id,
            AuditAction::Update,
            changes,
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(after)
    }

    pub fn delete_project(&self, id: &str, acting_user: &str) -> DomainResult<()> {
        let txn = self.storage.begin_write()?;

        let project = self
            .storage
            .get_project_txn(&txn, id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "project",
                id: id.to_string(),
            })?;

        self.storage.remove_project(&txn, id)?;
        self.recorder.record(
            &txn,
            "project",
            id,
            AuditAction::Delete,
            diff_entities("project", Some(&project), None),
            acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(())
    }

    // ========== Performance Reviews ==========

    pub fn create_review(&self, payload: &ReviewCreate) -> DomainResult<PerformanceReview> {
        if payload.reviewer_id == payload.employee_id {
            return Err(DomainError::Validation(
                "reviewer must differ from the reviewed employee".to_string(),
            ));
        }
        if payload.period_end < payload.period_start {
            return Err(DomainError::Validation(
                "review period end precedes its start".to_string(),
            ));
        }
        for (name, value) in [
            ("technical", payload.technical),
            ("communication", payload.communication),
            ("teamwork", payload.teamwork),
            ("initiative", payload.initiative),
            ("punctuality", payload.punctuality),
        ] {
            if !(1..=5).contains(&value) {
                return Err(DomainError::InvalidValue {
                    field: name,
                    value: value.to_string(),
                });
            }
        }

        let txn = self.storage.begin_write()?;
        self.check_employee_ref(&txn, "employee_id", &payload.employee_id)?;
        self.check_employee_ref(&txn, "reviewer_id", &payload.reviewer_id)?;

        let review = PerformanceReview {
            id: uuid::Uuid::new_v4().to_string(),
            employee_id: payload.employee_id.clone(),
            reviewer_id: payload.reviewer_id.clone(),
            review_date: payload.review_date,
            period_start: payload.period_start,
            period_end: payload.period_end,
            technical: payload.technical,
            communication: payload.communication,
            teamwork: payload.teamwork,
            initiative: payload.initiative,
            punctuality: payload.punctuality,
            created_at: now_millis(),
        };
        self.storage.put_review(&txn, &review)?;
        self.recorder.record(
            &txn,
            "performance_review",
            &review.id,
            AuditAction::Insert,
            diff_entities("performance_review", None, Some(&review)),
            &payload.acting_user,
        )?;
        txn.commit().map_err(StoreError::from)?;
        Ok(review)
    }

    pub fn get_review(&self, id: &str) -> DomainResult<PerformanceReview> {
        self.storage
            .get_review(id)?
            .ok_or_else(|| DomainError::NotFound {
                entity: "performance_review",
                id: id.to_string(),
            })
    }

    pub fn list_reviews(&self, employee_id: Option<&str>) -> DomainResult<Vec<PerformanceReview>> {
        Ok(self.storage.list_reviews(employee_id)?)
    }

    // ========== Reference checks ==========

    fn check_employee_ref(
        &self,
        txn: &WriteTransaction,
        field: &'static str,
        id: &str,
    ) -> DomainResult<()> {
        match self.storage.get_employee_txn(txn, id)? {
            Some(employee) if employee.is_active => Ok(()),
            _ => Err(DomainError::InvalidReference {
                field,
                id: id.to_string(),
            }),
        }
    }

    fn check_department_ref(&self, txn: &WriteTransaction, id: &str) -> DomainResult<()> {
        match self.storage.get_department_txn(txn, id)? {
            Some(_) => Ok(()),
            None => Err(DomainError::InvalidReference {
                field: "department_id",
                id: id.to_string(),
            }),
        }
    }
}

fn check_date_order(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> DomainResult<()> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(DomainError::Validation(
                "end_date precedes start_date".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::salary::SalaryPolicy;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn service() -> (PersonnelService, HrStorage) {
        let storage = HrStorage::open_in_memory().unwrap();
        let recorder = AuditRecorder::new(storage.clone());
        let salary = SalaryService::new(storage.clone(), recorder.clone(), SalaryPolicy::default());
        let personnel = PersonnelService::new(storage.clone(), recorder, salary);
        (personnel, storage)
    }

    fn department(personnel: &PersonnelService, name: &str) -> Department {
        personnel
            .create_department(&DepartmentCreate {
                name: name.to_string(),
                head_id: None,
                budget: Some(Decimal::from(1_000_000)),
                location: None,
                acting_user: "hr-admin".to_string(),
            })
            .unwrap()
    }

    fn employee_payload(department_id: &str, email: &str) -> EmployeeCreate {
        EmployeeCreate {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            phone: None,
            hire_date: NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(),
            department_id: department_id.to_string(),
            manager_id: None,
            job_title: "Engineer".to_string(),
            salary: Decimal::from(70_000),
            acting_user: "hr-admin".to_string(),
        }
    }

    #[test]
    fn create_employee_seeds_history_and_audit() {
        let (personnel, storage) = service();
        let dep = department(&personnel, "Engineering");

        let employee = personnel
            .create_employee(&employee_payload(&dep.id, "ada@example.com"))
            .unwrap();

        let history = storage.salary_history(&employee.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].previous_salary, None);
        assert_eq!(history[0].new_salary, Decimal::from(70_000));

        let audit = storage.all_audit_entries().unwrap();
        // department insert + employee insert
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[1].entity_type, "employee");
        assert_eq!(audit[1].action, AuditAction::Insert);
    }

    #[test]
    fn future_hire_date_is_rejected() {
        let (personnel, storage) = service();
        let dep = department(&personnel, "Engineering");

        let mut payload = employee_payload(&dep.id, "time@example.com");
        payload.hire_date = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        let err = personnel.create_employee(&payload).unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidValue {
                field: "hire_date",
                ..
            }
        ));
        assert!(storage.list_employees().unwrap().is_empty());

        // today itself is fine
        payload.hire_date = shared::util::today();
        personnel.create_employee(&payload).unwrap();
    }

    #[test]
    fn duplicate_email_and_bad_department_are_rejected() {
        let (personnel, _storage) = service();
        let dep = department(&personnel, "Engineering");
        personnel
            .create_employee(&employee_payload(&dep.id, "ada@example.com"))
            .unwrap();

        let err = personnel
            .create_employee(&employee_payload(&dep.id, "ADA@example.com"))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = personnel
            .create_employee(&employee_payload("no-such-dep", "other@example.com"))
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidReference {
                field: "department_id",
                ..
            }
        ));
    }

    #[test]
    fn update_audits_field_diff_and_skips_no_ops() {
        let (personnel, storage) = service();
        let dep = department(&personnel, "Engineering");
        let employee = personnel
            .create_employee(&employee_payload(&dep.id, "ada@example.com"))
            .unwrap();

        let update = EmployeeUpdate {
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            department_id: None,
            manager_id: None,
            job_title: Some("Staff Engineer".to_string()),
            acting_user: "hr-admin".to_string(),
        };
        let updated = personnel.update_employee(&employee.id, &update).unwrap();
        assert_eq!(updated.job_title, "Staff Engineer");

        let audit = storage.all_audit_entries().unwrap();
        let last = audit.last().unwrap();
        assert_eq!(last.action, AuditAction::Update);
        assert_eq!(last.changes.len(), 1);
        assert_eq!(last.changes[0].field, "job_title");

        // identical payload again changes nothing, so nothing is recorded
        let count_before = audit.len();
        personnel.update_employee(&employee.id, &update).unwrap();
        assert_eq!(storage.all_audit_entries().unwrap().len(), count_before);
    }

    #[test]
    fn manager_cycle_is_rejected_on_update() {
        let (personnel, _storage) = service();
        let dep = department(&personnel, "Engineering");
        let a = personnel
            .create_employee(&employee_payload(&dep.id, "a@example.com"))
            .unwrap();
        let mut payload = employee_payload(&dep.id, "b@example.com");
        payload.manager_id = Some(a.id.clone());
        let b = personnel.create_employee(&payload).unwrap();

        let update = EmployeeUpdate {
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            department_id: None,
            manager_id: Some(b.id.clone()),
            job_title: None,
            acting_user: "hr-admin".to_string(),
        };
        assert!(matches!(
            personnel.update_employee(&a.id, &update).unwrap_err(),
            DomainError::CyclicManagement { .. }
        ));
    }

    #[test]
    fn deactivation_is_blocked_while_managing_or_heading() {
        let (personnel, storage) = service();
        let dep = department(&personnel, "Engineering");
        let manager = personnel
            .create_employee(&employee_payload(&dep.id, "mgr@example.com"))
            .unwrap();
        let mut payload = employee_payload(&dep.id, "report@example.com");
        payload.manager_id = Some(manager.id.clone());
        let report = personnel.create_employee(&payload).unwrap();

        assert!(matches!(
            personnel
                .deactivate_employee(&manager.id, "hr-admin")
                .unwrap_err(),
            DomainError::Conflict(_)
        ));

        personnel.deactivate_employee(&report.id, "hr-admin").unwrap();
        let gone = storage.get_employee(&report.id).unwrap().unwrap();
        assert!(!gone.is_active);
        // row survives the soft delete
        assert_eq!(storage.salary_record_count(&report.id).unwrap(), 1);

        personnel.deactivate_employee(&manager.id, "hr-admin").unwrap();
        assert!(matches!(
            personnel
                .deactivate_employee(&manager.id, "hr-admin")
                .unwrap_err(),
            DomainError::Inactive { .. }
        ));
    }

    #[test]
    fn department_names_are_unique_and_deletes_are_guarded() {
        let (personnel, _storage) = service();
        let dep = department(&personnel, "Engineering");
        assert!(matches!(
            personnel
                .create_department(&DepartmentCreate {
                    name: "engineering".to_string(),
                    head_id: None,
                    budget: None,
                    location: None,
                    acting_user: "hr-admin".to_string(),
                })
                .unwrap_err(),
            DomainError::Conflict(_)
        ));

        let employee = personnel
            .create_employee(&employee_payload(&dep.id, "ada@example.com"))
            .unwrap();
        assert!(matches!(
            personnel.delete_department(&dep.id, "hr-admin").unwrap_err(),
            DomainError::Conflict(_)
        ));

        personnel.deactivate_employee(&employee.id, "hr-admin").unwrap();
        personnel.delete_department(&dep.id, "hr-admin").unwrap();
        assert!(matches!(
            personnel.get_department(&dep.id).unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[test]
    fn project_dates_must_be_ordered() {
        let (personnel, _storage) = service();
        let dep = department(&personnel, "Engineering");

        let err = personnel
            .create_project(&ProjectCreate {
                name: "Atlas".to_string(),
                department_id: dep.id.clone(),
                budget: None,
                start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
                end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
                acting_user: "hr-admin".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn reviews_enforce_reviewer_and_rating_rules() {
        let (personnel, _storage) = service();
        let dep = department(&personnel, "Engineering");
        let employee = personnel
            .create_employee(&employee_payload(&dep.id, "ada@example.com"))
            .unwrap();
        let reviewer = personnel
            .create_employee(&employee_payload(&dep.id, "mgr@example.com"))
            .unwrap();

        let mut payload = ReviewCreate {
            employee_id: employee.id.clone(),
            reviewer_id: employee.id.clone(),
            review_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            period_start: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            technical: 4,
            communication: 4,
            teamwork: 5,
            initiative: 3,
            punctuality: 4,
            acting_user: "hr-admin".to_string(),
        };
        assert!(matches!(
            personnel.create_review(&payload).unwrap_err(),
            DomainError::Validation(_)
        ));

        payload.reviewer_id = reviewer.id.clone();
        payload.technical = 6;
        assert!(matches!(
            personnel.create_review(&payload).unwrap_err(),
            DomainError::InvalidValue {
                field: "technical",
                ..
            }
        ));

        payload.technical = 4;
        let review = personnel.create_review(&payload).unwrap();
        assert_eq!(review.average(), 4.0);
        assert_eq!(
            personnel.list_reviews(Some(&employee.id)).unwrap().len(),
            1
        );
    }
}
