// src/engine/catalog.rs

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::prelude::FromRow;

use crate::{
    error::AppError,
    models::{
        aptitude::Aptitude,
        question::{Question, QuestionOption},
    },
};

/// In-memory snapshot of the scorable catalog: every aptitude plus the
/// active questions and their options. Loaded once per request so scoring
/// works against a consistent view.
#[derive(Debug, Clone, Default)]
pub struct ScoringCatalog {
    /// All aptitudes, ascending by id.
    pub aptitudes: Vec<Aptitude>,

    /// Active questions only.
    pub questions: Vec<Question>,

    /// Options belonging to the active questions.
    pub options: Vec<QuestionOption>,
}

/// A career linked to at least one of the selected top aptitudes.
#[derive(Debug, Clone, FromRow)]
pub struct CareerCandidate {
    pub id: i64,
    pub name: String,
    pub description: String,

    /// Distinct selected aptitude ids this career is linked to.
    pub matched: Vec<i64>,
}

/// A university linked to at least one of the selected top aptitudes.
#[derive(Debug, Clone, FromRow)]
pub struct UniversityCandidate {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub website: String,
    pub rating: f64,
    pub matched: Vec<i64>,
}

/// Read-only access to catalog reference data.
///
/// The engine receives this as an injected dependency; it never owns catalog
/// state and never writes through it.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn scoring_catalog(&self) -> Result<ScoringCatalog, AppError>;

    /// Careers linked to at least one selected aptitude, ordered by id,
    /// each with its distinct matched aptitude ids.
    async fn career_candidates(
        &self,
        selected: &[i64],
    ) -> Result<Vec<CareerCandidate>, AppError>;

    /// Universities linked to at least one selected aptitude, ordered by id.
    async fn university_candidates(
        &self,
        selected: &[i64],
    ) -> Result<Vec<UniversityCandidate>, AppError>;
}

/// Postgres-backed catalog store.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn scoring_catalog(&self) -> Result<ScoringCatalog, AppError> {
        let aptitudes = sqlx::query_as::<_, Aptitude>(
            "SELECT id, name, description FROM aptitudes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, content, position, active FROM questions WHERE active ORDER BY position, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let options = sqlx::query_as::<_, QuestionOption>(
            r#"
            SELECT o.id, o.question_id, o.content, o.aptitude_id, o.weight
            FROM question_options o
            JOIN questions q ON q.id = o.question_id
            WHERE q.active
            ORDER BY o.question_id, o.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ScoringCatalog {
            aptitudes,
            questions,
            options,
        })
    }

    async fn career_candidates(
        &self,
        selected: &[i64],
    ) -> Result<Vec<CareerCandidate>, AppError> {
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = sqlx::query_as::<_, CareerCandidate>(
            r#"
            SELECT c.id, c.name, c.description, ARRAY_AGG(ca.aptitude_id) AS matched
            FROM careers c
            JOIN career_aptitudes ca ON ca.career_id = c.id
            WHERE ca.aptitude_id = ANY($1)
            GROUP BY c.id, c.name, c.description
            ORDER BY c.id
            "#,
        )
        .bind(selected)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }

    async fn university_candidates(
        &self,
        selected: &[i64],
    ) -> Result<Vec<UniversityCandidate>, AppError> {
        if selected.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = sqlx::query_as::<_, UniversityCandidate>(
            r#"
            SELECT u.id, u.name, u.city, u.website, u.rating, ARRAY_AGG(ua.aptitude_id) AS matched
            FROM universities u
            JOIN university_aptitudes ua ON ua.university_id = u.id
            WHERE ua.aptitude_id = ANY($1)
            GROUP BY u.id, u.name, u.city, u.website, u.rating
            ORDER BY u.id
            "#,
        )
        .bind(selected)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }
}
