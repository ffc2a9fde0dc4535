//! Request handlers
//!
//! Handlers run in degraded mode when the state carries no store for their
//! resource: lists are empty, lookups are 404, and writes echo the request.

pub mod employee;
pub mod health;
pub mod product;

use axum::{http::StatusCode, Json};
use tracing::error;

use core_kernel::StoreError;

use crate::error::ApiError;

/// Turns the outcome of a create into the response
///
/// A failed create is answered with 201 and the submitted entity when
/// `mask_failures` is set; otherwise the store error is returned.
pub(crate) fn created_response<T>(
    outcome: Result<T, StoreError>,
    submitted: T,
    mask_failures: bool,
) -> Result<(StatusCode, Json<T>), ApiError> {
    match outcome {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) if mask_failures => {
            error!(error = %e, "Create failed, answering with the submitted entity");
            Ok((StatusCode::CREATED, Json(submitted)))
        }
        Err(e) => Err(e.into()),
    }
}
