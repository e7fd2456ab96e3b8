// src/services/place_service.rs
// DOCUMENTATION: Business logic for places
// PURPOSE: Intermediary between handlers and storage, handles lookups and validation

use crate::db::Storage;
use crate::errors::PlacesError;
use crate::models::{Amenity, CreatePlaceRequest, Place, UpdatePlaceRequest};
use validator::Validate;

pub struct PlaceService;

impl PlaceService {
    /// Places of a city; NotFound if the city is unknown
    pub async fn list_city_places(
        storage: &dyn Storage,
        city_id: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        if storage.get_city(city_id).await?.is_none() {
            return Err(PlacesError::NotFound(format!("City {}", city_id)));
        }
        storage.places_of_city(city_id).await
    }

    pub async fn get_place(storage: &dyn Storage, place_id: &str) -> Result<Place, PlacesError> {
        storage
            .get_place(place_id)
            .await?
            .ok_or_else(|| PlacesError::NotFound(format!("Place {}", place_id)))
    }

    /// Amenities currently linked to a place
    pub async fn place_amenities(
        storage: &dyn Storage,
        place_id: &str,
    ) -> Result<Vec<Amenity>, PlacesError> {
        let place = Self::get_place(storage, place_id).await?;
        storage.amenities_of_place(&place.id).await
    }

    /// Create a place in a city
    /// DOCUMENTATION: Checks run in order: user_id present, user exists, name present,
    /// field validation. The city must already have been checked by the caller.
    pub async fn create_place(
        storage: &dyn Storage,
        city_id: &str,
        req: CreatePlaceRequest,
    ) -> Result<Place, PlacesError> {
        let user_id = req
            .user_id
            .clone()
            .ok_or_else(|| PlacesError::InvalidInput("Missing user_id".to_string()))?;

        if storage.get_user(&user_id).await?.is_none() {
            return Err(PlacesError::NotFound(format!("User {}", user_id)));
        }

        let name = req
            .name
            .clone()
            .ok_or_else(|| PlacesError::InvalidInput("Missing name".to_string()))?;

        req.validate()
            .map_err(|e| PlacesError::ValidationError(e.to_string()))?;

        let mut place = Place::new(city_id.to_string(), user_id, name);
        place.description = req.description;
        place.number_rooms = req.number_rooms.unwrap_or_default();
        place.number_bathrooms = req.number_bathrooms.unwrap_or_default();
        place.max_guest = req.max_guest.unwrap_or_default();
        place.price_by_night = req.price_by_night.unwrap_or_default();
        place.latitude = req.latitude;
        place.longitude = req.longitude;

        storage.new_place(place.clone()).await?;
        storage.save().await?;

        log::info!("Created place {} in city {}", place.id, city_id);
        Ok(place)
    }

    pub async fn update_place(
        storage: &dyn Storage,
        place_id: &str,
        req: UpdatePlaceRequest,
    ) -> Result<Place, PlacesError> {
        let mut place = Self::get_place(storage, place_id).await?;

        req.validate()
            .map_err(|e| PlacesError::ValidationError(e.to_string()))?;

        place.apply_update(req);
        storage.update_place(place.clone()).await?;
        storage.save().await?;

        log::info!("Updated place {}", place.id);
        Ok(place)
    }

    pub async fn delete_place(storage: &dyn Storage, place_id: &str) -> Result<(), PlacesError> {
        if !storage.delete_place(place_id).await? {
            return Err(PlacesError::NotFound(format!("Place {}", place_id)));
        }
        storage.save().await?;

        log::info!("Deleted place {}", place_id);
        Ok(())
    }
}
