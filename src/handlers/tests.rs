// src/handlers/tests.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    engine::submission::SubmissionCoordinator,
    error::AppError,
    models::test_record::SubmitTestRequest,
};

/// Submits a completed questionnaire.
///
/// Structural validation happens here; answer/catalog consistency and the
/// transactional write are the coordinator's job.
pub async fn submit_test(
    State(coordinator): State<SubmissionCoordinator>,
    Json(payload): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::Validation(validation_errors.to_string()));
    }

    let result = coordinator.submit(payload.user_id, &payload.answers).await?;

    Ok((StatusCode::CREATED, Json(result)))
}

/// Returns the composed results for a submitted test.
pub async fn get_results(
    State(coordinator): State<SubmissionCoordinator>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let result = coordinator.results(id).await?;

    Ok(Json(result))
}
