// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod membership_client;
pub mod place_search;
pub mod place_service;

#[cfg(test)]
pub mod testing;

pub use membership_client::*;
pub use place_search::*;
pub use place_service::*;
