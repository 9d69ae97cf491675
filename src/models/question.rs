// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text content of the question.
    pub content: String,

    /// Display order within the questionnaire.
    pub position: i32,

    /// Inactive questions are excluded from the questionnaire and from scoring.
    pub active: bool,
}

/// Represents the 'question_options' table in the database.
/// Each option contributes its weight to exactly one aptitude when chosen.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: i64,
    pub question_id: i64,
    pub content: String,
    pub aptitude_id: i64,

    /// Positive contribution toward the linked aptitude, typically 0.1 - 5.0.
    pub weight: f64,
}

/// DTO for sending a question to clients.
/// Hides the aptitude mapping and weights so answers cannot be gamed.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub content: String,
    pub options: Vec<PublicOption>,
}

/// DTO for a selectable option (id and text only).
#[derive(Debug, Serialize)]
pub struct PublicOption {
    pub id: i64,
    pub content: String,
}
