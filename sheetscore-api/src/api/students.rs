//! Stored student listing

use axum::{extract::State, Json};

use crate::error::{ApiError, ApiResult};
use crate::models::StudentRecord;
use crate::AppState;

/// GET /api/students
///
/// Every stored record, in insertion order.
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<StudentRecord>>> {
    let students = state.store.list_all().await.map_err(ApiError::List)?;
    Ok(Json(students))
}
