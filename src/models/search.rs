// src/models/search.rs
// DOCUMENTATION: Place search filter
// PURPOSE: Body of POST /places_search

use serde::Deserialize;
use std::collections::HashSet;

/// Search filter with three optional id lists
/// DOCUMENTATION: Absent, null and empty lists all mean "not provided"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchFilter {
    #[serde(default)]
    pub states: Option<Vec<String>>,

    #[serde(default)]
    pub cities: Option<Vec<String>>,

    #[serde(default)]
    pub amenities: Option<Vec<String>>,
}

/// Drop repeated ids, keeping the first occurrence
fn unique(ids: &Option<Vec<String>>) -> Vec<&str> {
    let mut seen = HashSet::new();
    ids.iter()
        .flatten()
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect()
}

impl SearchFilter {
    pub fn state_ids(&self) -> Vec<&str> {
        unique(&self.states)
    }

    pub fn city_ids(&self) -> Vec<&str> {
        unique(&self.cities)
    }

    pub fn amenity_ids(&self) -> Vec<&str> {
        unique(&self.amenities)
    }

    /// True when none of the three lists carries an id
    pub fn is_empty(&self) -> bool {
        self.state_ids().is_empty() && self.city_ids().is_empty() && self.amenity_ids().is_empty()
    }
}
