use axum::{
    extract::{rejection::{JsonRejection, PathRejection}, Path, State},
    http::StatusCode,
    Json,
};
use service::students::{StudentPayload, StudentRecord};
use tracing::{debug, warn};

use crate::errors::JsonApiError;
use crate::state::AppState;

const NOT_FOUND: &str = "Student not found";

/// Non-integer ids behave like a route that does not exist.
fn student_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    id.map(|Path(id)| id).map_err(|e| {
        debug!(error = %e, "unparseable student id");
        JsonApiError::not_found(NOT_FOUND)
    })
}

fn payload(body: Result<Json<StudentPayload>, JsonRejection>) -> Result<StudentPayload, JsonApiError> {
    body.map(|Json(p)| p).map_err(|e| {
        warn!(error = %e, "rejected request body");
        JsonApiError::bad_request("Invalid JSON body")
    })
}

/// POST /student
pub async fn create_student(
    State(state): State<AppState>,
    body: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentRecord>), JsonApiError> {
    let created = state.students.create(payload(body)?).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /student
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<StudentRecord>>, JsonApiError> {
    let all = state.students.list().await?;
    debug!(count = all.len(), "list students");
    Ok(Json(all))
}

/// GET /student/:id
pub async fn get_student(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<StudentRecord>, JsonApiError> {
    let found = state.students.get(student_id(id)?).await?;
    Ok(Json(found))
}

/// PUT /student/:id
pub async fn update_student(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<StudentRecord>, JsonApiError> {
    let id = student_id(id)?;
    let input = match payload(body) {
        Ok(p) => p,
        Err(e) => {
            // unknown ids win over body problems
            state.students.get(id).await?;
            return Err(e);
        }
    };
    let updated = state.students.update(id, input).await?;
    Ok(Json(updated))
}

/// DELETE /student/:id
pub async fn delete_student(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<StudentRecord>, JsonApiError> {
    let removed = state.students.delete(student_id(id)?).await?;
    Ok(Json(removed))
}
