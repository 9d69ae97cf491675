// src/models/career.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'careers' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Career {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A career ranked against the user's top aptitudes.
///
/// `matching_aptitudes` counts the distinct top aptitudes the career is
/// linked to; `match_percentage` is that count over the number of selected
/// top aptitudes, rounded to two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct CareerMatch {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub matching_aptitudes: i64,
    pub match_percentage: f64,
}
