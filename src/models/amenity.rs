// src/models/amenity.rs
// DOCUMENTATION: Amenities and their links to places
// PURPOSE: Many-to-many Place <-> Amenity relationship records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Amenity record (wifi, pool, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the place_amenity association table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PlaceAmenity {
    pub place_id: String,
    pub amenity_id: String,
}

/// Entry of a membership listing; only the id is needed to cross-reference
/// DOCUMENTATION: Element of GET /places/{id}/amenities as read back by the membership client
#[derive(Debug, Clone, Deserialize)]
pub struct AmenityRef {
    pub id: String,
}
