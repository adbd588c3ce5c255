//! Label Service - price check for one supplement photo
//!
//! 1. Require the photo (warning if absent, before any network call)
//! 2. Load and validate it
//! 3. Extract the label through the vision backend
//! 4. Apply the pricing rules

use std::path::PathBuf;

use nutriscan_domain::service::analyze_label;
use nutriscan_types::{
    Error, LabelAnalysis, RemoteReport, Result, DEFAULT_MANUAL_WEIGHT_G, DEFAULT_PRICE,
};
use nutriscan_vision::{extract_supplement_label, RemoteAnalyzer, VisionBackend};
use tracing::info;

use crate::scanner::load_image;

/// Warning shown when the label photo is missing
pub const MISSING_LABEL_PHOTO: &str = "Por favor, envie a foto do rótulo primeiro.";

/// Inputs for one label check
#[derive(Debug, Clone)]
pub struct LabelRequest {
    pub image: Option<PathBuf>,
    /// Container price (R$)
    pub price: f64,
    /// User-entered container weight (g); 0 lets the label decide
    pub manual_weight_g: u32,
}

impl Default for LabelRequest {
    fn default() -> Self {
        Self {
            image: None,
            price: DEFAULT_PRICE,
            manual_weight_g: DEFAULT_MANUAL_WEIGHT_G,
        }
    }
}

impl LabelRequest {
    pub fn new(image: Option<PathBuf>) -> Self {
        Self {
            image,
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_manual_weight(mut self, weight_g: u32) -> Self {
        self.manual_weight_g = weight_g;
        self
    }
}

/// Extract a label with the vision model and price it locally
pub fn analyze_label_photo(
    backend: &dyn VisionBackend,
    request: &LabelRequest,
) -> Result<LabelAnalysis> {
    let path = request
        .image
        .as_deref()
        .ok_or_else(|| Error::Validation(MISSING_LABEL_PHOTO.to_string()))?;
    let image = load_image(path)?;

    let label = extract_supplement_label(backend, &image)?;
    let analysis = analyze_label(label, request.price, f64::from(request.manual_weight_g));
    info!(
        cost_per_gram = analysis.metrics.cost_per_gram_protein,
        verdict = analysis.metrics.verdict.label(),
        "label priced"
    );
    Ok(analysis)
}

/// Send the photo to the external analysis service instead
pub fn analyze_label_remote(
    remote: &RemoteAnalyzer,
    request: &LabelRequest,
) -> Result<RemoteReport> {
    let path = request
        .image
        .as_deref()
        .ok_or_else(|| Error::Validation(MISSING_LABEL_PHOTO.to_string()))?;
    let image = load_image(path)?;
    remote.analyze(&image, request.price, request.manual_weight_g)
}
