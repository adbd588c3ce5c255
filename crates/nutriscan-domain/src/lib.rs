//! Domain layer: capture requirements and the pricing / stamping rules

pub mod model;
pub mod service;
