//! Core types and physical constants

pub mod constants;
pub mod superdrop;

pub use superdrop::{validate_superdrops, Coords, SoluteProperties, Superdrop, SuperdropId};
