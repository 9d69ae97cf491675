// src/models/university.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'universities' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct University {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub website: String,

    /// Public ranking score, used as a tie-break when match percentages equal.
    pub rating: f64,
}

/// A university ranked against the user's top aptitudes.
#[derive(Debug, Clone, Serialize)]
pub struct UniversityMatch {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub website: String,
    pub rating: f64,
    pub matching_aptitudes: i64,
    pub match_percentage: f64,
}
