//! Core records for label pricing and fleet readings

use serde::{Deserialize, Serialize};

/// Product name shown when the label did not yield one
pub const DEFAULT_PRODUCT_NAME: &str = "Produto Analisado";

/// Serving size assumed when the label did not yield a usable one
pub const DEFAULT_SERVING_SIZE_G: f64 = 30.0;

/// Container weight used when neither the user nor the label provides one
pub const FALLBACK_CONTAINER_WEIGHT_G: f64 = 900.0;

/// Default price offered to the user (R$)
pub const DEFAULT_PRICE: f64 = 150.00;

/// Default manual weight offered to the user (g)
pub const DEFAULT_MANUAL_WEIGHT_G: u32 = 900;

/// Data read from a supplement nutrition label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementLabel {
    pub product_name: String,
    pub serving_size_g: f64,
    pub protein_per_serving_g: f64,
    /// 0 when the label does not show it
    pub total_container_weight_g: f64,
    pub suspicious_ingredients: Vec<String>,
}

impl Default for SupplementLabel {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            serving_size_g: DEFAULT_SERVING_SIZE_G,
            protein_per_serving_g: 0.0,
            total_container_weight_g: 0.0,
            suspicious_ingredients: Vec::new(),
        }
    }
}

impl SupplementLabel {
    pub fn has_suspicious_ingredients(&self) -> bool {
        !self.suspicious_ingredients.is_empty()
    }
}

/// Colour tag attached to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictColor {
    Green,
    Orange,
    Red,
}

impl VerdictColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictColor::Green => "green",
            VerdictColor::Orange => "orange",
            VerdictColor::Red => "red",
        }
    }
}

/// Price verdict for the cost of one gram of protein
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Cheap,
    Fair,
    Expensive,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Cheap => "BARATO! VALE A PENA",
            Verdict::Fair => "PREÇO JUSTO",
            Verdict::Expensive => "CARO. TEM OPÇÕES MELHORES",
        }
    }

    pub fn color(&self) -> VerdictColor {
        match self {
            Verdict::Cheap => VerdictColor::Green,
            Verdict::Fair => VerdictColor::Orange,
            Verdict::Expensive => VerdictColor::Red,
        }
    }
}

/// Derived pricing figures for one container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProteinMetrics {
    /// Weight actually used in the calculation, never zero
    pub effective_weight_g: f64,
    pub concentration_pct: f64,
    pub total_protein_g: f64,
    /// 0 when the container has no protein to price
    pub cost_per_gram_protein: f64,
    pub verdict: Verdict,
}

/// Everything the label command shows for one photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAnalysis {
    pub label: SupplementLabel,
    pub price: f64,
    pub metrics: ProteinMetrics,
}

/// One refuelling record. Field order is the column order of the exported row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetReading {
    #[serde(rename = "prefixo")]
    pub bus_prefix: String,
    #[serde(rename = "odometro_km")]
    pub odometer_km: i64,
    #[serde(rename = "litros")]
    pub liters: f64,
    #[serde(rename = "numero_bomba")]
    pub pump_number: String,
    /// DD/MM/YYYY, São Paulo time
    #[serde(rename = "data")]
    pub date: String,
    /// HH:MM:SS, São Paulo time
    #[serde(rename = "hora")]
    pub time: String,
}

/// Result returned by the external label-analysis service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteReport {
    pub product: String,
    pub protein_per_scoop_g: f64,
    pub concentration: String,
    pub scoop_g: f64,
    pub weight_considered_g: f64,
    pub verdict: String,
    pub cost_per_gram: f64,
    pub alerts: Vec<String>,
}
