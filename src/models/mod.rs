// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod amenity;
pub mod location;
pub mod place;
pub mod search;
pub mod user;

pub use amenity::*;
pub use location::*;
pub use place::*;
pub use search::*;
pub use user::*;
