// src/models/location.rs
// DOCUMENTATION: Geographic hierarchy (State -> City)
// PURPOSE: Records traversed by the place search

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A state owns many cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct State {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A city belongs to one state and owns many places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: String,
    pub state_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
