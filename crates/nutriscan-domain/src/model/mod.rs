//! Domain model types

pub mod fleet;

pub use fleet::{FleetFields, FleetLayout, FleetPhotos, PhotoSlot};
