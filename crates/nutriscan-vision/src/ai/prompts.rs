//! Extraction prompts
//!
//! Prompts are written in Portuguese, matching the labels and dashboards being
//! photographed. Each one ends with the exact JSON shape expected back; the keys
//! here must stay in sync with the field readers in `parser`.

use nutriscan_domain::model::FleetLayout;

/// JSON keys requested from the label prompt
pub mod label_keys {
    pub const PRODUCT_NAME: &str = "nome_produto";
    pub const SERVING_SIZE: &str = "tamanho_porcao_g";
    pub const PROTEIN_PER_SERVING: &str = "proteina_por_porcao_g";
    pub const CONTAINER_WEIGHT: &str = "peso_total_pote_g";
    pub const SUSPICIOUS_INGREDIENTS: &str = "ingredientes_suspeitos";
}

/// JSON keys requested from the fleet prompts
pub mod fleet_keys {
    pub const PREFIX: &str = "prefixo";
    pub const ODOMETER: &str = "odometro_km";
    pub const LITERS: &str = "litros";
    pub const PUMP: &str = "numero_bomba";
}

/// Prompt for a single nutrition-label photo
pub fn build_label_prompt() -> String {
    format!(
        r#"Analise este rótulo nutricional. Extraia os dados em JSON puro:
{{
    "{name}": "string",
    "{serving}": float,
    "{protein}": float,
    "{weight}": float,
    "{suspicious}": ["lista de ingredientes ruins se houver"]
}}
Se não encontrar o peso total na imagem, retorne 0."#,
        name = label_keys::PRODUCT_NAME,
        serving = label_keys::SERVING_SIZE,
        protein = label_keys::PROTEIN_PER_SERVING,
        weight = label_keys::CONTAINER_WEIGHT,
        suspicious = label_keys::SUSPICIOUS_INGREDIENTS,
    )
}

fn fleet_image_guide(layout: FleetLayout) -> &'static str {
    match layout {
        FleetLayout::Three => concat!(
            "1. A primeira imagem é o exterior do ônibus. Extraia o NÚMERO DO PREFIXO (ex: 1040, 2030).\n",
            "2. A segunda imagem é o painel. Extraia o ODÔMETRO (Km total). Ignore trip ou parciais.\n",
            "3. A terceira imagem é a bomba de combustível. Extraia a LITRAGEM abastecida e o NÚMERO DA BOMBA ou BICO.\n",
        ),
        FleetLayout::Four => concat!(
            "1. A primeira imagem é o exterior do ônibus. Extraia o NÚMERO DO PREFIXO (ex: 1040, 2030).\n",
            "2. A segunda imagem é o painel. Extraia o ODÔMETRO (Km total). Ignore trip ou parciais.\n",
            "3. A terceira imagem é o visor da bomba. Extraia a LITRAGEM abastecida.\n",
            "4. A quarta imagem é a identificação da bomba. Extraia o NÚMERO DA BOMBA ou BICO.\n",
        ),
    }
}

/// Prompt for an ordered fleet capture
pub fn build_fleet_prompt(layout: FleetLayout) -> String {
    format!(
        r#"Você é um assistente de frota de ônibus. Analise estas {count} imagens em ordem:
{guide}
Retorne APENAS um JSON neste formato:
{{
    "{prefix}": "string",
    "{odometer}": int,
    "{liters}": float,
    "{pump}": "string"
}}"#,
        count = layout.photo_count(),
        guide = fleet_image_guide(layout),
        prefix = fleet_keys::PREFIX,
        odometer = fleet_keys::ODOMETER,
        liters = fleet_keys::LITERS,
        pump = fleet_keys::PUMP,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prompt_lists_every_key() {
        let prompt = build_label_prompt();
        for key in [
            label_keys::PRODUCT_NAME,
            label_keys::SERVING_SIZE,
            label_keys::PROTEIN_PER_SERVING,
            label_keys::CONTAINER_WEIGHT,
            label_keys::SUSPICIOUS_INGREDIENTS,
        ] {
            assert!(prompt.contains(&format!("\"{}\"", key)), "missing {}", key);
        }
        assert!(prompt.contains("retorne 0"));
    }

    #[test]
    fn test_fleet_prompt_counts_images() {
        assert!(build_fleet_prompt(FleetLayout::Three).contains("estas 3 imagens"));
        let four = build_fleet_prompt(FleetLayout::Four);
        assert!(four.contains("estas 4 imagens"));
        assert!(four.contains("4. A quarta imagem"));
    }

    #[test]
    fn test_fleet_prompt_lists_every_key() {
        let prompt = build_fleet_prompt(FleetLayout::Three);
        for key in [
            fleet_keys::PREFIX,
            fleet_keys::ODOMETER,
            fleet_keys::LITERS,
            fleet_keys::PUMP,
        ] {
            assert!(prompt.contains(&format!("\"{}\"", key)), "missing {}", key);
        }
    }
}
