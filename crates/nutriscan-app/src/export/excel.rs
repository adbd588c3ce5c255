//! Excel export of a fleet reading

use std::path::Path;

use nutriscan_types::{Error, FleetReading, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

/// Column headers, same order as the CSV row
const HEADERS: [&str; 6] = ["prefixo", "odometro_km", "litros", "numero_bomba", "data", "hora"];

/// Write one reading as a single-row workbook
pub fn export_fleet_to_excel(reading: &FleetReading, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    write_record_sheet(sheet, reading)?;

    workbook
        .save(output_path)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

fn write_record_sheet(sheet: &mut Worksheet, reading: &FleetReading) -> Result<()> {
    sheet
        .set_name("Registro")
        .map_err(|e| Error::Excel(e.to_string()))?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| Error::Excel(e.to_string()))?;
    }

    // Prefix and pump stay text so leading zeros survive
    sheet
        .write_string(1, 0, &reading.bus_prefix)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(1, 1, reading.odometer_km as f64)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_number(1, 2, reading.liters)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(1, 3, &reading.pump_number)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(1, 4, &reading.date)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .write_string(1, 5, &reading.time)
        .map_err(|e| Error::Excel(e.to_string()))?;

    sheet
        .set_column_width(0, 12)
        .map_err(|e| Error::Excel(e.to_string()))?;
    sheet
        .set_column_width(4, 12)
        .map_err(|e| Error::Excel(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workbook_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registro_2031.xlsx");
        let reading = FleetReading {
            bus_prefix: "2031".to_string(),
            odometer_km: 154320,
            liters: 38.5,
            pump_number: "07".to_string(),
            date: "14/06/2025".to_string(),
            time: "12:04:05".to_string(),
        };

        export_fleet_to_excel(&reading, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip archive
        assert_eq!(&bytes[..2], b"PK");
    }
}
