// src/engine/submission.rs

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    engine::{
        catalog::{CatalogStore, ScoringCatalog},
        matching,
        scoring::{self, RankedAptitude, ScoringMode},
    },
    error::AppError,
    models::{
        aptitude::Aptitude,
        test_record::{AnswerInput, AptitudeResult, TestRecord, TestResult},
    },
};

/// Orchestrates a test submission: persists the record, its answers and the
/// derived scores in one transaction, then composes the recommendation
/// payload. A failure at any step rolls the whole submission back.
#[derive(Clone)]
pub struct SubmissionCoordinator {
    pool: PgPool,
    catalog: Arc<dyn CatalogStore>,
    mode: ScoringMode,
}

impl SubmissionCoordinator {
    pub fn new(pool: PgPool, catalog: Arc<dyn CatalogStore>, mode: ScoringMode) -> Self {
        Self {
            pool,
            catalog,
            mode,
        }
    }

    /// Persists a submission atomically and returns the composed result.
    ///
    /// Answers are validated against a fresh catalog snapshot before the
    /// transaction opens; once writing starts, every failure maps to
    /// `SubmissionFailed` and the dropped transaction rolls back, so no
    /// partial record, answers or scores remain visible.
    pub async fn submit(
        &self,
        user_id: i64,
        answers: &[AnswerInput],
    ) -> Result<TestResult, AppError> {
        let catalog = self.catalog.scoring_catalog().await?;
        scoring::validate_answers(&catalog, answers)?;
        let ranked = scoring::score_answers(&catalog, answers, self.mode);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::SubmissionFailed(e.to_string()))?;

        let test_id: i64 =
            sqlx::query_scalar("INSERT INTO test_records (user_id) VALUES ($1) RETURNING id")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| AppError::SubmissionFailed(e.to_string()))?;

        for answer in answers {
            sqlx::query(
                "INSERT INTO test_answers (test_id, question_id, option_id) VALUES ($1, $2, $3)",
            )
            .bind(test_id)
            .bind(answer.question_id)
            .bind(answer.option_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::SubmissionFailed(e.to_string()))?;
        }
        tracing::debug!("test {}: {} answers persisted", test_id, answers.len());

        // Only aptitudes that actually scored are stored.
        for entry in ranked.iter().filter(|r| r.raw_score > 0.0) {
            sqlx::query(
                "INSERT INTO aptitude_scores (test_id, aptitude_id, score, percentage) VALUES ($1, $2, $3, $4)",
            )
            .bind(test_id)
            .bind(entry.aptitude_id)
            .bind(entry.raw_score)
            .bind(entry.percentage)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::SubmissionFailed(e.to_string()))?;
        }

        let result = match self.compose(test_id, &catalog, &ranked).await {
            Ok(result) => result,
            // A catalog integrity gap is reported as such; anything else that
            // aborts the submission is a submission failure.
            Err(err @ AppError::CatalogLookup(_)) => return Err(err),
            Err(err) => return Err(AppError::SubmissionFailed(err.to_string())),
        };

        tx.commit()
            .await
            .map_err(|e| AppError::SubmissionFailed(e.to_string()))?;

        tracing::info!("test {} submitted for user {}", test_id, user_id);
        Ok(result)
    }

    /// Returns the results for a previously submitted test.
    ///
    /// Scores are re-derived from the persisted answers rather than read back
    /// from the stored score rows, so the output follows the current catalog
    /// and repeated calls agree with each other.
    pub async fn results(&self, test_id: i64) -> Result<TestResult, AppError> {
        let record = sqlx::query_as::<_, TestRecord>(
            "SELECT id, user_id, completed_at FROM test_records WHERE id = $1",
        )
        .bind(test_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Test not found".to_string()))?;

        let answers = sqlx::query_as::<_, AnswerInput>(
            "SELECT question_id, option_id FROM test_answers WHERE test_id = $1 ORDER BY question_id",
        )
        .bind(test_id)
        .fetch_all(&self.pool)
        .await?;

        let catalog = self.catalog.scoring_catalog().await?;
        let ranked = scoring::score_answers(&catalog, &answers, self.mode);

        self.compose(record.id, &catalog, &ranked).await
    }

    /// Builds the result payload: ranked aptitudes plus career and university
    /// recommendations driven by the top aptitudes.
    async fn compose(
        &self,
        test_id: i64,
        catalog: &ScoringCatalog,
        ranked: &[RankedAptitude],
    ) -> Result<TestResult, AppError> {
        let by_id: HashMap<i64, &Aptitude> =
            catalog.aptitudes.iter().map(|a| (a.id, a)).collect();

        let mut aptitudes = Vec::with_capacity(ranked.len());
        for entry in ranked {
            let aptitude = by_id.get(&entry.aptitude_id).ok_or_else(|| {
                AppError::CatalogLookup(format!(
                    "Aptitude {} missing from catalog",
                    entry.aptitude_id
                ))
            })?;
            aptitudes.push(AptitudeResult {
                id: aptitude.id,
                name: aptitude.name.clone(),
                description: aptitude.description.clone(),
                score: entry.raw_score,
                percentage: entry.percentage,
            });
        }

        let selected = matching::top_aptitudes(ranked, matching::TOP_APTITUDES);
        let (careers, universities) = if selected.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let careers = matching::rank_careers(
                self.catalog.career_candidates(&selected).await?,
                selected.len(),
            );
            let universities = matching::rank_universities(
                self.catalog.university_candidates(&selected).await?,
                selected.len(),
            );
            (careers, universities)
        };

        Ok(TestResult {
            id: test_id,
            aptitudes,
            careers,
            universities,
        })
    }
}
