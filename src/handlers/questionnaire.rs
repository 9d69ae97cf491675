// src/handlers/questionnaire.rs

use std::collections::HashMap;

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::question::{PublicOption, PublicQuestion, Question, QuestionOption},
};

/// Returns the active questionnaire in display order.
///
/// Options are mapped to public DTOs so the aptitude links and weights never
/// reach the client.
pub async fn get_questionnaire(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, content, position, active FROM questions WHERE active ORDER BY position, id",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questionnaire: {:?}", e);
        AppError::Internal(e.to_string())
    })?;

    let options = sqlx::query_as::<_, QuestionOption>(
        r#"
        SELECT o.id, o.question_id, o.content, o.aptitude_id, o.weight
        FROM question_options o
        JOIN questions q ON q.id = o.question_id
        WHERE q.active
        ORDER BY o.id
        "#,
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch questionnaire options: {:?}", e);
        AppError::Internal(e.to_string())
    })?;

    let mut by_question: HashMap<i64, Vec<PublicOption>> = HashMap::new();
    for option in options {
        by_question
            .entry(option.question_id)
            .or_default()
            .push(PublicOption {
                id: option.id,
                content: option.content,
            });
    }

    let paper: Vec<PublicQuestion> = questions
        .into_iter()
        .map(|q| PublicQuestion {
            id: q.id,
            content: q.content,
            options: by_question.remove(&q.id).unwrap_or_default(),
        })
        .collect();

    Ok(Json(paper))
}
