//! Use cases: one function per user action

pub mod fleet_service;
pub mod label_service;

pub use fleet_service::{record_refuelling, record_refuelling_with_clock, FleetRequest};
pub use label_service::{analyze_label_photo, analyze_label_remote, LabelRequest};
