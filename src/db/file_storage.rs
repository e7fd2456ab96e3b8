// src/db/file_storage.rs
// DOCUMENTATION: JSON file storage engine
// PURPOSE: Keep every object in memory, persist the whole dump on save()

use crate::db::Storage;
use crate::errors::PlacesError;
use crate::models::{Amenity, City, Place, PlaceAmenity, State, User};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Serialized form of the whole object space
/// DOCUMENTATION: Vectors keep insertion order, which is the iteration order of the engine
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ObjectDump {
    #[serde(default)]
    pub states: Vec<State>,
    #[serde(default)]
    pub cities: Vec<City>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub place_amenities: Vec<PlaceAmenity>,
}

/// File-backed storage engine
/// DOCUMENTATION: Concurrent readers share the RwLock; writers take it exclusively.
/// Without a path the engine is purely in-memory and save() is a no-op.
pub struct FileStorage {
    path: Option<PathBuf>,
    objects: RwLock<ObjectDump>,
}

impl FileStorage {
    pub fn from_dump(dump: ObjectDump, path: Option<PathBuf>) -> Self {
        Self {
            path,
            objects: RwLock::new(dump),
        }
    }

    /// Load the dump at `path`; a missing file starts an empty store
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PlacesError> {
        let path = path.as_ref().to_path_buf();

        let dump = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<ObjectDump>(&bytes).map_err(|e| {
                log::error!("Failed to parse storage file {}: {}", path.display(), e);
                PlacesError::StorageError(format!("Corrupt storage file: {}", e))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!(
                    "Storage file {} not found - starting with an empty store",
                    path.display()
                );
                ObjectDump::default()
            }
            Err(e) => {
                return Err(PlacesError::StorageError(format!(
                    "Cannot read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        log::info!(
            "Loaded {} states, {} cities, {} places, {} amenities from {}",
            dump.states.len(),
            dump.cities.len(),
            dump.places.len(),
            dump.amenities.len(),
            path.display()
        );

        Ok(Self::from_dump(dump, Some(path)))
    }
}

/// `file.json` -> `file.json.tmp`, in the same directory so rename stays atomic
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl Storage for FileStorage {
    async fn all_places(&self) -> Result<Vec<Place>, PlacesError> {
        Ok(self.objects.read().await.places.clone())
    }

    async fn get_state(&self, id: &str) -> Result<Option<State>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.states.iter().find(|s| s.id == id).cloned())
    }

    async fn get_city(&self, id: &str) -> Result<Option<City>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.cities.iter().find(|c| c.id == id).cloned())
    }

    async fn get_place(&self, id: &str) -> Result<Option<Place>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.places.iter().find(|p| p.id == id).cloned())
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.amenities.iter().find(|a| a.id == id).cloned())
    }

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects
            .cities
            .iter()
            .filter(|c| c.state_id == state_id)
            .cloned()
            .collect())
    }

    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects
            .places
            .iter()
            .filter(|p| p.city_id == city_id)
            .cloned()
            .collect())
    }

    async fn amenities_of_place(&self, place_id: &str) -> Result<Vec<Amenity>, PlacesError> {
        let objects = self.objects.read().await;
        let linked = objects
            .place_amenities
            .iter()
            .filter(|link| link.place_id == place_id)
            .filter_map(|link| objects.amenities.iter().find(|a| a.id == link.amenity_id))
            .cloned()
            .collect();
        Ok(linked)
    }

    async fn new_place(&self, place: Place) -> Result<(), PlacesError> {
        let mut objects = self.objects.write().await;
        log::debug!("Staging new place {}", place.id);
        objects.places.push(place);
        Ok(())
    }

    async fn update_place(&self, place: Place) -> Result<(), PlacesError> {
        let mut objects = self.objects.write().await;
        match objects.places.iter_mut().find(|p| p.id == place.id) {
            Some(slot) => {
                *slot = place;
                Ok(())
            }
            None => Err(PlacesError::NotFound(format!("Place {}", place.id))),
        }
    }

    async fn delete_place(&self, place_id: &str) -> Result<bool, PlacesError> {
        let mut objects = self.objects.write().await;
        let before = objects.places.len();
        objects.places.retain(|p| p.id != place_id);
        let removed = objects.places.len() < before;

        if removed {
            objects.place_amenities.retain(|link| link.place_id != place_id);
        }
        Ok(removed)
    }

    async fn save(&self) -> Result<(), PlacesError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = {
            let objects = self.objects.read().await;
            serde_json::to_vec_pretty(&*objects)
                .map_err(|e| PlacesError::StorageError(e.to_string()))?
        };

        // Write a sibling file then rename it over the dump, so a crash never
        // leaves a truncated dump behind
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            log::error!("Failed to write storage file {}: {}", tmp.display(), e);
            PlacesError::StorageError(format!("Cannot write {}: {}", tmp.display(), e))
        })?;

        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            log::error!("Failed to replace storage file {}: {}", path.display(), e);
            PlacesError::StorageError(format!("Cannot replace {}: {}", path.display(), e))
        })
    }
}
