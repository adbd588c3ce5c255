//! Fleet Service - one refuelling record from a set of photos
//!
//! Every required photo must be present before anything is read or sent;
//! an incomplete capture never produces a partial record.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use nutriscan_domain::model::{FleetLayout, FleetPhotos, PhotoSlot};
use nutriscan_domain::service::{stamp_at, stamp_reading};
use nutriscan_types::{Error, FleetReading, Result};
use nutriscan_vision::{extract_fleet_fields, ImageInput, VisionBackend};

use crate::scanner::load_image;

/// Inputs for one refuelling record
#[derive(Debug, Clone, Default)]
pub struct FleetRequest {
    pub layout: FleetLayout,
    pub photos: FleetPhotos<PathBuf>,
}

fn missing_photos_message(layout: FleetLayout, missing: &[PhotoSlot]) -> String {
    let names: Vec<&str> = missing.iter().map(|slot| slot.label()).collect();
    format!(
        "Por favor, envie as {} fotos para processar (faltando: {}).",
        layout.photo_count(),
        names.join(", ")
    )
}

/// Read the capture and stamp it with the current São Paulo time
pub fn record_refuelling(backend: &dyn VisionBackend, request: &FleetRequest) -> Result<FleetReading> {
    record_refuelling_with_clock(backend, request, Utc::now)
}

/// As [`record_refuelling`], with the stamping clock supplied by the caller
pub fn record_refuelling_with_clock<F>(
    backend: &dyn VisionBackend,
    request: &FleetRequest,
    clock: F,
) -> Result<FleetReading>
where
    F: FnOnce() -> DateTime<Utc>,
{
    let paths = request
        .photos
        .clone()
        .into_ordered(request.layout)
        .map_err(|missing| Error::Validation(missing_photos_message(request.layout, &missing)))?;

    let images = paths
        .iter()
        .map(|path| load_image(path))
        .collect::<Result<Vec<ImageInput>>>()?;

    let fields = extract_fleet_fields(backend, &images, request.layout)?;
    Ok(stamp_reading(fields, stamp_at(clock())))
}
