//! Model response parsing
//!
//! Two steps, kept apart so each can be tested on its own:
//! 1. [`parse_loose`] turns raw model text into a JSON object map. This is the
//!    only step that can fail, and only on malformed JSON.
//! 2. The `*_from_fields` readers pull typed fields out of the map, falling back
//!    to a named default for anything absent, null or unreadable.

use nutriscan_domain::model::FleetFields;
use nutriscan_types::{
    Error, RemoteReport, Result, SupplementLabel, DEFAULT_PRODUCT_NAME, DEFAULT_SERVING_SIZE_G,
};
use serde_json::{Map, Value};
use tracing::warn;

use crate::ai::prompts::{fleet_keys, label_keys};

/// Loosely typed JSON object returned by a model
pub type FieldMap = Map<String, Value>;

/// Remove a leading ```` ``` ```` / ```` ```json ```` marker and a trailing ```` ``` ````
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
    }
    let trimmed_end = text.trim_end();
    if let Some(rest) = trimmed_end.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Strip fences and parse the remainder as a JSON object
pub fn parse_loose(raw: &str) -> Result<FieldMap> {
    let text = strip_code_fences(raw);
    let value: Value = serde_json::from_str(text).map_err(|e| {
        let truncated: String = raw.chars().take(200).collect();
        Error::Parse(format!("{} | raw: {}", e, truncated))
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Parse(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Field readers
// ============================================================================

/// First number in the text with its separators: "30 g" -> "30", "154320 km (parcial 230)" -> "154320"
fn first_numeric_token(s: &str) -> Option<(bool, &str)> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let negative = s[..start].ends_with('-');
    let rest = s[start..].as_bytes();

    let mut end = 0;
    while end < rest.len() {
        let b = rest[end];
        let separator_then_digit =
            matches!(b, b'.' | b',') && rest.get(end + 1).is_some_and(|n| n.is_ascii_digit());
        if b.is_ascii_digit() || separator_then_digit {
            end += 1;
        } else {
            break;
        }
    }
    Some((negative, &s[start..start + end]))
}

/// Which separator is the decimal mark. `Ok(None)` means every separator groups
/// thousands; `Err(())` means the grouping is malformed.
fn decimal_mark(token: &str) -> std::result::Result<Option<char>, ()> {
    let last_dot = token.rfind('.');
    let last_comma = token.rfind(',');
    let sep = match (last_dot, last_comma) {
        (Some(d), Some(c)) => return Ok(Some(if d > c { '.' } else { ',' })),
        (Some(_), None) => '.',
        (None, Some(_)) => ',',
        (None, None) => return Ok(None),
    };

    let mut groups = token.split(sep);
    let head = groups.next().unwrap_or_default();
    let tail: Vec<&str> = groups.collect();
    let groups_thousands = !head.is_empty()
        && head.len() <= 3
        && !head.starts_with('0')
        && tail.iter().all(|g| g.len() == 3);

    if tail.len() > 1 {
        // "1.234.567" groups; "1.23.4" is nonsense
        return if groups_thousands { Ok(None) } else { Err(()) };
    }
    // A lone separator before exactly three digits groups thousands: "1.800" is 1800
    if groups_thousands {
        Ok(None)
    } else {
        Ok(Some(sep))
    }
}

/// Parse numbers written the way labels and panels print them:
/// "24", "24,5", "30 g", "1.800 g", "1.234,5", "154.320 km"
fn parse_lenient_number(s: &str) -> Option<f64> {
    let (negative, token) = first_numeric_token(s.trim())?;
    let mark = decimal_mark(token).ok()?;

    let mut normalized: String = token
        .chars()
        .filter_map(|c| match c {
            '.' | ',' if Some(c) == mark => Some('.'),
            '.' | ',' => None,
            digit => Some(digit),
        })
        .collect();
    if negative {
        normalized.insert(0, '-');
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric field; accepts JSON numbers and numeric strings
pub fn number_field(fields: &FieldMap, key: &str) -> Option<f64> {
    match fields.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_lenient_number(s),
        _ => None,
    }
}

/// Non-negative whole-number field; any fractional part is dropped
/// ("154320.7" -> 154320, "154.320 km" -> 154320)
pub fn integer_field(fields: &FieldMap, key: &str) -> Option<i64> {
    let value = match fields.get(key)? {
        Value::Number(n) => n.as_i64().map(|i| i as f64).or_else(|| n.as_f64()),
        Value::String(s) => parse_lenient_number(s),
        _ => None,
    }?;
    if value < 0.0 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}

fn number_as_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Text field; numbers are rendered as text (integral floats without ".0"),
/// blanks count as absent
pub fn text_field(fields: &FieldMap, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(number_as_text(n)),
        _ => None,
    }
}

/// List of strings; a lone string becomes a one-item list
pub fn string_list_field(fields: &FieldMap, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

// ============================================================================
// Records
// ============================================================================

pub fn label_from_fields(fields: &FieldMap) -> SupplementLabel {
    let product_name =
        text_field(fields, label_keys::PRODUCT_NAME).unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

    let serving_size_g = match number_field(fields, label_keys::SERVING_SIZE) {
        Some(size) if size > 0.0 => size,
        other => {
            warn!(value = ?other, default = DEFAULT_SERVING_SIZE_G, "serving size unusable, using default");
            DEFAULT_SERVING_SIZE_G
        }
    };

    let protein_per_serving_g = number_field(fields, label_keys::PROTEIN_PER_SERVING).unwrap_or_else(|| {
        warn!("protein per serving missing, using 0");
        0.0
    });

    SupplementLabel {
        product_name,
        serving_size_g,
        protein_per_serving_g,
        total_container_weight_g: number_field(fields, label_keys::CONTAINER_WEIGHT).unwrap_or(0.0),
        suspicious_ingredients: string_list_field(fields, label_keys::SUSPICIOUS_INGREDIENTS),
    }
}

pub fn fleet_fields_from_fields(fields: &FieldMap) -> FleetFields {
    let bus_prefix = text_field(fields, fleet_keys::PREFIX).unwrap_or_default();
    if bus_prefix.is_empty() {
        warn!("bus prefix not read from photos");
    }
    FleetFields {
        bus_prefix,
        odometer_km: integer_field(fields, fleet_keys::ODOMETER).unwrap_or(0),
        liters: number_field(fields, fleet_keys::LITERS).unwrap_or(0.0),
        pump_number: text_field(fields, fleet_keys::PUMP).unwrap_or_default(),
    }
}

/// Read the external analysis service's reply
pub fn remote_report_from_fields(fields: &FieldMap) -> RemoteReport {
    let empty = FieldMap::new();
    let nutrition = fields
        .get("analise_nutricional")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let finance = fields
        .get("financeiro")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    RemoteReport {
        product: text_field(fields, "produto").unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string()),
        protein_per_scoop_g: number_field(nutrition, "proteina_por_scoop_g").unwrap_or(0.0),
        concentration: text_field(nutrition, "concentracao").unwrap_or_default(),
        scoop_g: number_field(nutrition, "scoop_g").unwrap_or(0.0),
        weight_considered_g: number_field(nutrition, "peso_total_considerado").unwrap_or(0.0),
        verdict: text_field(finance, "veredito").unwrap_or_default(),
        cost_per_gram: number_field(finance, "custo_real_por_grama").unwrap_or(0.0),
        alerts: string_list_field(fields, "alerta"),
    }
}
