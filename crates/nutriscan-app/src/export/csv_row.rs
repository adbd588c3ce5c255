//! CSV download of a fleet reading

use std::path::{Path, PathBuf};

use nutriscan_domain::model::FleetLayout;
use nutriscan_types::{Error, FleetReading, Result};
use tracing::info;

/// Header line plus one data row, UTF-8
pub fn fleet_row_csv(reading: &FleetReading) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(reading)?;
    writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))
}

/// Write the row into `dir` under the layout's file name; returns the path written
pub fn write_fleet_csv(reading: &FleetReading, layout: FleetLayout, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(layout.export_file_name(&reading.bus_prefix));
    std::fs::write(&path, fleet_row_csv(reading)?)?;
    info!(path = %path.display(), "fleet row exported");
    Ok(path)
}
