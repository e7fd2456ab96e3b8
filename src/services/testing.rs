// src/services/testing.rs
// DOCUMENTATION: Shared test fixtures
// PURPOSE: A small object space and a scripted membership source for unit tests

use crate::db::ObjectDump;
use crate::errors::PlacesError;
use crate::models::{Amenity, City, Place, PlaceAmenity, State, User};
use crate::services::AmenityMembership;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

pub const AMENITY_WIFI: &str = "amenity-wifi";
pub const AMENITY_POOL: &str = "amenity-pool";

fn at(minute: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, minute, 0).unwrap()
}

pub fn state(id: &str, name: &str) -> State {
    State {
        id: id.to_string(),
        name: name.to_string(),
        created_at: at(0),
        updated_at: at(0),
    }
}

pub fn city(id: &str, state_id: &str, name: &str) -> City {
    City {
        id: id.to_string(),
        state_id: state_id.to_string(),
        name: name.to_string(),
        created_at: at(1),
        updated_at: at(1),
    }
}

pub fn place(id: &str, city_id: &str, name: &str) -> Place {
    Place {
        id: id.to_string(),
        city_id: city_id.to_string(),
        user_id: "user-1".to_string(),
        name: name.to_string(),
        description: None,
        number_rooms: 2,
        number_bathrooms: 1,
        max_guest: 4,
        price_by_night: 100,
        latitude: Some(37.77),
        longitude: Some(-122.41),
        created_at: at(2),
        updated_at: at(2),
    }
}

pub fn amenity(id: &str, name: &str) -> Amenity {
    Amenity {
        id: id.to_string(),
        name: name.to_string(),
        created_at: at(3),
        updated_at: at(3),
    }
}

fn link(place_id: &str, amenity_id: &str) -> PlaceAmenity {
    PlaceAmenity {
        place_id: place_id.to_string(),
        amenity_id: amenity_id.to_string(),
    }
}

/// California (San Francisco, Los Angeles) and Nevada (Las Vegas):
///
/// | place          | city   | amenities  |
/// |----------------|--------|------------|
/// | place-loft     | sf     | wifi, pool |
/// | place-studio   | sf     | wifi       |
/// | place-bungalow | la     | (none)     |
/// | place-suite    | vegas  | wifi, pool |
///
/// State `state-empty` has no cities.
pub fn sample_dump() -> ObjectDump {
    ObjectDump {
        states: vec![
            state("state-ca", "California"),
            state("state-nv", "Nevada"),
            state("state-empty", "Wyoming"),
        ],
        cities: vec![
            city("city-sf", "state-ca", "San Francisco"),
            city("city-la", "state-ca", "Los Angeles"),
            city("city-vegas", "state-nv", "Las Vegas"),
        ],
        users: vec![User {
            id: "user-1".to_string(),
            email: "host@hbnb.io".to_string(),
            first_name: Some("Betty".to_string()),
            last_name: None,
            created_at: at(0),
            updated_at: at(0),
        }],
        amenities: vec![amenity(AMENITY_WIFI, "Wifi"), amenity(AMENITY_POOL, "Pool")],
        places: vec![
            place("place-loft", "city-sf", "Golden Loft"),
            place("place-studio", "city-sf", "Bay Studio"),
            place("place-bungalow", "city-la", "Venice Bungalow"),
            place("place-suite", "city-vegas", "Strip Suite"),
        ],
        place_amenities: vec![
            link("place-loft", AMENITY_WIFI),
            link("place-loft", AMENITY_POOL),
            link("place-studio", AMENITY_WIFI),
            link("place-suite", AMENITY_WIFI),
            link("place-suite", AMENITY_POOL),
        ],
    }
}

/// Membership source answering from a fixed table
/// DOCUMENTATION: Places listed in `failing` return an ExternalApiError; places in
/// `delays` answer only after sleeping. Lookups are recorded at call time and
/// completions at answer time.
#[derive(Default)]
pub struct ScriptedMembership {
    memberships: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
    completions: Mutex<Vec<String>>,
}

impl ScriptedMembership {
    /// Memberships mirroring the links of `dump`
    pub fn from_dump(dump: &ObjectDump) -> Self {
        let mut scripted = Self::default();
        for link in &dump.place_amenities {
            scripted
                .memberships
                .entry(link.place_id.clone())
                .or_default()
                .push(link.amenity_id.clone());
        }
        scripted
    }

    pub fn with_failure(mut self, place_id: &str) -> Self {
        self.failing.insert(place_id.to_string());
        self
    }

    pub fn with_membership(mut self, place_id: &str, amenity_ids: &[&str]) -> Self {
        self.memberships.insert(
            place_id.to_string(),
            amenity_ids.iter().map(|id| id.to_string()).collect(),
        );
        self
    }

    pub fn with_delay(mut self, place_id: &str, delay: Duration) -> Self {
        self.delays.insert(place_id.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn completions(&self) -> Vec<String> {
        self.completions.lock().unwrap().clone()
    }
}

#[async_trait]
impl AmenityMembership for ScriptedMembership {
    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        self.calls.lock().unwrap().push(place_id.to_string());

        if let Some(delay) = self.delays.get(place_id) {
            tokio::time::sleep(*delay).await;
        }
        self.completions.lock().unwrap().push(place_id.to_string());

        if self.failing.contains(place_id) {
            return Err(PlacesError::ExternalApiError(format!(
                "scripted failure for {}",
                place_id
            )));
        }
        Ok(self.memberships.get(place_id).cloned().unwrap_or_default())
    }
}
