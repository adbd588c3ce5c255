//! Vision module - model-driven extraction of nutrition labels and fleet readings

pub mod ai;
pub mod parser;
pub mod remote;

// Re-export main types for convenience
pub use ai::backend::{ImageInput, VisionBackend};
pub use ai::gemini::{Credentials, GeminiClient, GeminiOptions};
pub use ai::prompts::{build_fleet_prompt, build_label_prompt};
pub use parser::{parse_loose, strip_code_fences, FieldMap};
pub use remote::RemoteAnalyzer;

use nutriscan_domain::model::{FleetFields, FleetLayout};
use nutriscan_types::{Error, Result, SupplementLabel};
use tracing::info;

use parser::{fleet_fields_from_fields, label_from_fields};

/// Read a nutrition label from one photo
pub fn extract_supplement_label(
    backend: &dyn VisionBackend,
    image: &ImageInput,
) -> Result<SupplementLabel> {
    let prompt = build_label_prompt();
    let raw = backend.send_prompt(&prompt, std::slice::from_ref(image))?;
    let fields = parse_loose(&raw)?;
    let label = label_from_fields(&fields);
    info!(product = %label.product_name, "label extracted");
    Ok(label)
}

/// Read a fleet capture. `images` must already be in the layout's slot order.
pub fn extract_fleet_fields(
    backend: &dyn VisionBackend,
    images: &[ImageInput],
    layout: FleetLayout,
) -> Result<FleetFields> {
    if images.len() != layout.photo_count() {
        return Err(Error::Validation(format!(
            "Por favor, envie as {} fotos para processar.",
            layout.photo_count()
        )));
    }

    let prompt = build_fleet_prompt(layout);
    let raw = backend.send_prompt(&prompt, images)?;
    let fields = parse_loose(&raw)?;
    let fleet = fleet_fields_from_fields(&fields);
    info!(prefix = %fleet.bus_prefix, odometer_km = fleet.odometer_km, "fleet reading extracted");
    Ok(fleet)
}
