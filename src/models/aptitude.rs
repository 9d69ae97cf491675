// src/models/aptitude.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'aptitudes' table in the database.
/// A scored dimension of vocational fit (e.g., "Mathematics").
/// Immutable reference data from this service's perspective.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Aptitude {
    pub id: i64,
    pub name: String,
    pub description: String,
}
