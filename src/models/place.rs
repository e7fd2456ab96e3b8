// src/models/place.rs
// DOCUMENTATION: Core data structures for places
// PURPOSE: Defines serialization models for the API, the object dump and the database

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents a complete place record
/// DOCUMENTATION: Maps directly to the places table and to entries of the object dump
/// Serialized as-is (flat object) in every API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Place {
    /// Unique identifier (UUID v4 string)
    pub id: String,

    /// Owning city
    pub city_id: String,

    /// Host user
    pub user_id: String,

    /// Place name - required field for all places
    pub name: String,

    /// Optional detailed description
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub number_rooms: i32,

    #[serde(default)]
    pub number_bathrooms: i32,

    /// Guest capacity
    #[serde(default)]
    pub max_guest: i32,

    #[serde(default)]
    pub price_by_night: i32,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    /// When record was created
    pub created_at: DateTime<Utc>,

    /// When record was last modified
    pub updated_at: DateTime<Utc>,
}

impl Place {
    /// Build a fresh place with a new id and timestamps
    pub fn new(city_id: String, user_id: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            city_id,
            user_id,
            name,
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update request, leaving identity and ownership untouched
    pub fn apply_update(&mut self, req: UpdatePlaceRequest) {
        if let Some(name) = req.name {
            self.name = name;
        }
        if let Some(description) = req.description {
            self.description = Some(description);
        }
        if let Some(rooms) = req.number_rooms {
            self.number_rooms = rooms;
        }
        if let Some(bathrooms) = req.number_bathrooms {
            self.number_bathrooms = bathrooms;
        }
        if let Some(guests) = req.max_guest {
            self.max_guest = guests;
        }
        if let Some(price) = req.price_by_night {
            self.price_by_night = price;
        }
        if let Some(latitude) = req.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = req.longitude {
            self.longitude = Some(longitude);
        }
        self.updated_at = Utc::now();
    }
}

/// Request DTO for creating a new place
/// DOCUMENTATION: Body of POST /cities/{city_id}/places
/// user_id and name are optional at the type level so missing keys get their own messages
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Default)]
pub struct CreatePlaceRequest {
    pub user_id: Option<String>,

    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub number_rooms: Option<i32>,

    #[validate(range(min = 0))]
    pub number_bathrooms: Option<i32>,

    #[validate(range(min = 0))]
    pub max_guest: Option<i32>,

    #[validate(range(min = 0))]
    pub price_by_night: Option<i32>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Request DTO for updating an existing place
/// DOCUMENTATION: Body of PUT /places/{id}
/// id, user_id, city_id, created_at and updated_at are not part of the struct and are ignored
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct UpdatePlaceRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    #[validate(length(max = 1024))]
    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub number_rooms: Option<i32>,

    #[validate(range(min = 0))]
    pub number_bathrooms: Option<i32>,

    #[validate(range(min = 0))]
    pub max_guest: Option<i32>,

    #[validate(range(min = 0))]
    pub price_by_night: Option<i32>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}
