//! Data transfer objects for the API surface.

pub mod health;
pub mod resolution;
