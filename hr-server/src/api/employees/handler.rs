//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate, SalaryRecord};
use crate::salary::SalaryChange;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// List employees, active only unless `include_inactive` is set
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let mut employees = state.personnel.list_employees()?;
    if !query.include_inactive {
        employees.retain(|e| e.is_active);
    }
    Ok(Json(employees))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.personnel.get_employee(&id)?))
}

/// Create a new employee (writes the initial salary record with it)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state.personnel.create_employee(&payload)?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update non-salary fields of an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.personnel.update_employee(&id, &payload)?))
}

#[derive(Debug, Deserialize)]
pub struct DeleteBody {
    pub acting_user: String,
}

/// Soft delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<DeleteBody>,
) -> AppResult<Json<Employee>> {
    Ok(Json(
        state.personnel.deactivate_employee(&id, &body.acting_user)?,
    ))
}

/// Salary change request body; the employee comes from the path.
#[derive(Debug, Deserialize)]
pub struct SalaryChangeBody {
    pub new_salary: Decimal,
    pub reason: String,
    #[serde(default)]
    pub approver_id: Option<String>,
    pub acting_user: String,
}

/// Apply a salary change
pub async fn change_salary(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(body): Json<SalaryChangeBody>,
) -> AppResult<(StatusCode, Json<SalaryRecord>)> {
    let change = SalaryChange {
        employee_id: id,
        new_salary: body.new_salary,
        reason: body.reason,
        approver_id: body.approver_id,
        acting_user: body.acting_user,
    };
    let record = state.salary.change_salary(&change)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Salary history, newest first
pub async fn salary_history(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<SalaryRecord>>> {
    Ok(Json(state.salary.history(&id)?))
}
