//! Domain services

pub mod fleet_clock;
pub mod protein_pricing;

pub use fleet_clock::{stamp_at, stamp_now, stamp_reading, to_sao_paulo, FleetTimestamp};
pub use protein_pricing::{analyze_label, calculate_metrics, verdict_for_cost};
