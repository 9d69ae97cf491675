// src/models/test_record.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

use crate::models::{career::CareerMatch, university::UniversityMatch};

/// Represents the 'test_records' table in the database.
/// One row per completed submission; immutable after creation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: i64,

    /// Opaque caller-supplied identifier; accounts live outside this service.
    pub user_id: i64,

    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One submitted answer: the chosen option for a question.
/// Doubles as the row shape of 'test_answers' on the read path.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AnswerInput {
    pub question_id: i64,
    pub option_id: i64,
}

/// DTO for submitting a completed questionnaire.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitTestRequest {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, message = "answers must not be empty"))]
    pub answers: Vec<AnswerInput>,
}

/// One aptitude in the ranked results payload.
#[derive(Debug, Clone, Serialize)]
pub struct AptitudeResult {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub score: f64,
    pub percentage: i32,
}

/// Composed result of a submission, also returned by the results endpoint.
/// Aptitudes are ranked by score; careers and universities by match quality.
#[derive(Debug, Serialize)]
pub struct TestResult {
    pub id: i64,
    pub aptitudes: Vec<AptitudeResult>,
    pub careers: Vec<CareerMatch>,
    pub universities: Vec<UniversityMatch>,
}
