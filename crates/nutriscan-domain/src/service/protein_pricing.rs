//! Protein pricing for supplement containers
//!
//! # Formulas
//! concentration = protein_per_serving / serving_size x 100
//! total_protein = effective_weight / serving_size x protein_per_serving
//! cost_per_gram = price / total_protein
//!
//! Any figure that would divide by a non-positive serving size or protein
//! total is reported as 0 instead.

use nutriscan_types::{
    LabelAnalysis, ProteinMetrics, SupplementLabel, Verdict, FALLBACK_CONTAINER_WEIGHT_G,
};

/// Cost per gram strictly below this is a bargain (R$)
pub const CHEAP_BELOW: f64 = 0.15;

/// Cost per gram strictly above this is overpriced (R$)
pub const EXPENSIVE_ABOVE: f64 = 0.22;

/// Weight used in the calculation: the user's figure wins, then the label's,
/// then [`FALLBACK_CONTAINER_WEIGHT_G`].
pub fn resolve_effective_weight(user_weight_g: f64, extracted_weight_g: f64) -> f64 {
    if user_weight_g > 0.0 {
        user_weight_g
    } else if extracted_weight_g > 0.0 {
        extracted_weight_g
    } else {
        FALLBACK_CONTAINER_WEIGHT_G
    }
}

pub fn concentration_pct(protein_per_serving_g: f64, serving_size_g: f64) -> f64 {
    if serving_size_g <= 0.0 {
        return 0.0;
    }
    (protein_per_serving_g / serving_size_g) * 100.0
}

pub fn total_protein_in_container(
    effective_weight_g: f64,
    serving_size_g: f64,
    protein_per_serving_g: f64,
) -> f64 {
    if serving_size_g <= 0.0 {
        return 0.0;
    }
    (effective_weight_g / serving_size_g) * protein_per_serving_g
}

pub fn cost_per_gram_protein(price: f64, total_protein_g: f64) -> f64 {
    if total_protein_g <= 0.0 {
        return 0.0;
    }
    price / total_protein_g
}

/// First matching tier wins; a zero cost is always the neutral verdict.
pub fn verdict_for_cost(cost_per_gram: f64) -> Verdict {
    if cost_per_gram <= 0.0 {
        return Verdict::Fair;
    }
    if cost_per_gram < CHEAP_BELOW {
        Verdict::Cheap
    } else if cost_per_gram > EXPENSIVE_ABOVE {
        Verdict::Expensive
    } else {
        Verdict::Fair
    }
}

pub fn calculate_metrics(label: &SupplementLabel, price: f64, user_weight_g: f64) -> ProteinMetrics {
    let effective_weight_g =
        resolve_effective_weight(user_weight_g, label.total_container_weight_g);
    let concentration_pct =
        concentration_pct(label.protein_per_serving_g, label.serving_size_g);
    let total_protein_g = total_protein_in_container(
        effective_weight_g,
        label.serving_size_g,
        label.protein_per_serving_g,
    );
    let cost_per_gram_protein = cost_per_gram_protein(price, total_protein_g);

    ProteinMetrics {
        effective_weight_g,
        concentration_pct,
        total_protein_g,
        cost_per_gram_protein,
        verdict: verdict_for_cost(cost_per_gram_protein),
    }
}

pub fn analyze_label(label: SupplementLabel, price: f64, user_weight_g: f64) -> LabelAnalysis {
    let metrics = calculate_metrics(&label, price, user_weight_g);
    LabelAnalysis {
        label,
        price,
        metrics,
    }
}
