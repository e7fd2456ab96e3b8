// src/db/mod.rs
// DOCUMENTATION: Storage abstraction and its backends
// PURPOSE: Every handler and the search resolver talk to `dyn Storage` only

pub mod file_storage;
pub mod repository;

pub use file_storage::*;
pub use repository::*;

use crate::errors::PlacesError;
use crate::models::{Amenity, City, Place, State, User};
use async_trait::async_trait;

/// Object storage engine
/// DOCUMENTATION: Lookups return Ok(None) for unknown ids; Err is reserved for backend failures.
/// Collections come back in the engine's iteration order (insertion order for the
/// file engine, creation order for PostgreSQL).
#[async_trait]
pub trait Storage: Send + Sync {
    async fn all_places(&self) -> Result<Vec<Place>, PlacesError>;

    async fn get_state(&self, id: &str) -> Result<Option<State>, PlacesError>;
    async fn get_city(&self, id: &str) -> Result<Option<City>, PlacesError>;
    async fn get_place(&self, id: &str) -> Result<Option<Place>, PlacesError>;
    async fn get_user(&self, id: &str) -> Result<Option<User>, PlacesError>;
    async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, PlacesError>;

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, PlacesError>;
    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, PlacesError>;
    async fn amenities_of_place(&self, place_id: &str) -> Result<Vec<Amenity>, PlacesError>;

    /// Stage a new place
    async fn new_place(&self, place: Place) -> Result<(), PlacesError>;

    /// Replace a stored place by id; NotFound if it no longer exists
    async fn update_place(&self, place: Place) -> Result<(), PlacesError>;

    /// Remove a place and its amenity links; false if nothing was removed
    async fn delete_place(&self, place_id: &str) -> Result<bool, PlacesError>;

    /// Flush staged changes to the backing medium
    async fn save(&self) -> Result<(), PlacesError>;
}
