// src/services/membership_client.rs
// DOCUMENTATION: Amenity membership client
// PURPOSE: Ask the places API which amenities are currently linked to a place

use crate::config::Config;
use crate::errors::PlacesError;
use crate::models::AmenityRef;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Source of place -> amenity memberships
/// DOCUMENTATION: Returns the raw amenity ids listed for a place; the caller
/// resolves them against storage
#[async_trait]
pub trait AmenityMembership: Send + Sync {
    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, PlacesError>;
}

/// HTTP membership client
/// DOCUMENTATION: Calls GET {base_url}/places/{place_id}/amenities with a per-request timeout
pub struct MembershipClient {
    /// HTTP client for making requests
    client: Client,
    /// Versioned API root, e.g. http://0.0.0.0:5000/api/v1
    base_url: String,
}

impl MembershipClient {
    /// Create new client against `base_url`
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, PlacesError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            log::error!("Failed to build membership HTTP client: {}", e);
            PlacesError::InternalError
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, PlacesError> {
        Self::new(config.api_base_url(), config.membership_timeout())
    }

    fn amenities_url(&self, place_id: &str) -> String {
        format!("{}/places/{}/amenities", self.base_url, place_id)
    }
}

#[async_trait]
impl AmenityMembership for MembershipClient {
    async fn amenity_ids(&self, place_id: &str) -> Result<Vec<String>, PlacesError> {
        let url = self.amenities_url(place_id);

        log::debug!("Membership lookup: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            log::error!("Membership request for place {} failed: {}", place_id, e);
            PlacesError::ExternalApiError(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::error!("Membership API error {} for place {}: {}", status, place_id, body);
            return Err(PlacesError::ExternalApiError(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let entries: Vec<AmenityRef> = response.json().await.map_err(|e| {
            log::error!("Failed to parse membership response for {}: {}", place_id, e);
            PlacesError::ExternalApiError(format!("Parse error: {}", e))
        })?;

        Ok(entries.into_iter().map(|entry| entry.id).collect())
    }
}
