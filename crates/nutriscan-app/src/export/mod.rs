//! Single-row export of fleet readings

pub mod csv_row;
pub mod excel;

pub use csv_row::{fleet_row_csv, write_fleet_csv};
pub use excel::export_fleet_to_excel;
