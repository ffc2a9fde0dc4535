//! Employee handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::debug;

use core_kernel::{EmployeeId, StoreError};
use domain_employee::Employee;

use crate::handlers::created_response;
use crate::{error::ApiError, AppState};

/// Lists employees
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    let Some(store) = state.employees.as_ref() else {
        return Ok(Json(Vec::new()));
    };

    let employees = store.list_employees().await?;
    debug!(count = employees.len(), "Listed employees");
    Ok(Json(employees))
}

/// Gets an employee by ID
pub async fn get_employee(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let Some(store) = state.employees.as_ref() else {
        return Err(StoreError::not_found(EmployeeId::entity(), id).into());
    };

    Ok(Json(store.get_employee(id).await?))
}

/// Creates an employee
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(employee) = payload?;
    let Some(store) = state.employees.as_ref() else {
        return Ok((StatusCode::CREATED, Json(employee)));
    };

    let outcome = store.create_employee(employee.clone()).await;
    created_response(outcome, employee, state.config.mask_create_failures)
}

/// Replaces an employee
pub async fn update_employee(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Path(id) = id?;
    let Json(employee) = payload?;
    let Some(store) = state.employees.as_ref() else {
        return Ok(Json(employee.with_id(id)));
    };

    Ok(Json(store.update_employee(id, employee).await?))
}

/// Deletes an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    id: Result<Path<EmployeeId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if let Some(store) = state.employees.as_ref() {
        store.delete_employee(id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
