// src/services/place_search.rs
// DOCUMENTATION: Place search resolver behind POST /places_search
// PURPOSE: Expand State -> City -> Place, then keep places holding every requested amenity

use crate::db::Storage;
use crate::errors::PlacesError;
use crate::models::{Place, SearchFilter};
use crate::services::AmenityMembership;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;

/// Place search resolver
/// DOCUMENTATION: Read-only. Output order is the order in which each place was
/// first discovered; a place never appears twice.
pub struct PlaceSearch {
    storage: Arc<dyn Storage>,
    membership: Arc<dyn AmenityMembership>,
    /// Membership lookups in flight at once
    concurrency: usize,
}

impl PlaceSearch {
    pub fn new(
        storage: Arc<dyn Storage>,
        membership: Arc<dyn AmenityMembership>,
        concurrency: usize,
    ) -> Self {
        Self {
            storage,
            membership,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve a filter into the matching places
    ///
    /// # Rules
    /// * No ids at all: every stored place, storage order.
    /// * States then cities contribute their places; unknown ids contribute nothing.
    /// * Only amenities given: every stored place is a candidate.
    /// * Amenities given: a candidate survives only if it has all of them.
    pub async fn resolve(&self, filter: &SearchFilter) -> Result<Vec<Place>, PlacesError> {
        if filter.is_empty() {
            return self.storage.all_places().await;
        }

        let state_ids = filter.state_ids();
        let city_ids = filter.city_ids();
        let amenity_ids = filter.amenity_ids();

        let candidates = if state_ids.is_empty() && city_ids.is_empty() {
            self.storage.all_places().await?
        } else {
            self.expand_geography(&state_ids, &city_ids).await?
        };

        log::debug!(
            "Place search: {} candidates from {} states / {} cities",
            candidates.len(),
            state_ids.len(),
            city_ids.len()
        );

        if amenity_ids.is_empty() {
            return Ok(candidates);
        }

        let total = candidates.len();
        let places = self.retain_with_amenities(candidates, &amenity_ids).await?;

        log::info!(
            "Place search: {}/{} candidates hold amenities {:?}",
            places.len(),
            total,
            amenity_ids
        );
        Ok(places)
    }

    /// Places of the given states, then of the given cities, without repeats
    async fn expand_geography(
        &self,
        state_ids: &[&str],
        city_ids: &[&str],
    ) -> Result<Vec<Place>, PlacesError> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for state_id in state_ids {
            if self.storage.get_state(state_id).await?.is_none() {
                log::debug!("Place search: skipping unknown state {}", state_id);
                continue;
            }
            for city in self.storage.cities_of_state(state_id).await? {
                for place in self.storage.places_of_city(&city.id).await? {
                    if seen.insert(place.id.clone()) {
                        candidates.push(place);
                    }
                }
            }
        }

        for city_id in city_ids {
            if self.storage.get_city(city_id).await?.is_none() {
                log::debug!("Place search: skipping unknown city {}", city_id);
                continue;
            }
            for place in self.storage.places_of_city(city_id).await? {
                if seen.insert(place.id.clone()) {
                    candidates.push(place);
                }
            }
        }

        Ok(candidates)
    }

    /// Check every candidate's memberships, then keep the ones holding all `required`
    async fn retain_with_amenities(
        &self,
        candidates: Vec<Place>,
        required: &[&str],
    ) -> Result<Vec<Place>, PlacesError> {
        // buffered() yields in input order whatever the completion order
        let checked: Vec<(Place, Result<bool, PlacesError>)> = stream::iter(candidates)
            .map(move |place| async move {
                let keep = self.has_amenities(&place, required).await;
                (place, keep)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut places = Vec::with_capacity(checked.len());
        for (place, keep) in checked {
            if keep? {
                places.push(place);
            }
        }
        Ok(places)
    }

    /// Membership failures exclude the candidate; storage failures abort the search
    async fn has_amenities(&self, place: &Place, required: &[&str]) -> Result<bool, PlacesError> {
        let listed = match self.membership.amenity_ids(&place.id).await {
            Ok(ids) => ids,
            Err(e) => {
                log::warn!(
                    "Place search: excluding place {} (membership lookup failed: {})",
                    place.id,
                    e
                );
                return Ok(false);
            }
        };

        let mut linked = HashSet::new();
        for amenity_id in listed {
            match self.storage.get_amenity(&amenity_id).await? {
                Some(amenity) => {
                    linked.insert(amenity.id);
                }
                None => log::debug!(
                    "Place search: place {} lists unknown amenity {}",
                    place.id,
                    amenity_id
                ),
            }
        }

        Ok(required.iter().all(|id| linked.contains(*id)))
    }
}
