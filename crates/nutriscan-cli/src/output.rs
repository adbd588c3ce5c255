//! Output formatting module

use std::io::IsTerminal;
use std::path::Path;

use nutriscan_types::{FleetReading, LabelAnalysis, OutputFormat, RemoteReport, Result, VerdictColor};

fn paint(text: &str, color: VerdictColor, ansi: bool) -> String {
    if !ansi {
        return format!("{} [{}]", text, color.as_str());
    }
    let code = match color {
        VerdictColor::Green => "32",
        VerdictColor::Orange => "33",
        VerdictColor::Red => "31",
    };
    format!("\x1b[1;{}m{}\x1b[0m", code, text)
}

fn ingredients_line(alerts: &[String]) -> String {
    if alerts.is_empty() {
        "✅ Ingredientes parecem OK!".to_string()
    } else {
        format!("⚠️ Atenção: {}", alerts.join(", "))
    }
}

fn render_label(analysis: &LabelAnalysis, ansi: bool) -> String {
    let label = &analysis.label;
    let metrics = &analysis.metrics;
    let verdict = metrics.verdict;

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", label.product_name));
    out.push_str(&format!("{}\n", "=".repeat(label.product_name.chars().count())));
    out.push_str(&format!("{}\n\n", paint(verdict.label(), verdict.color(), ansi)));
    out.push_str(&format!(
        "Proteína p/ Scoop: {}g (em {}g)\n",
        label.protein_per_serving_g, label.serving_size_g
    ));
    out.push_str(&format!("Concentração:      {:.0}%\n", metrics.concentration_pct));
    out.push_str(&format!("R$ por g/Prot.:    R$ {:.2}\n", metrics.cost_per_gram_protein));
    out.push_str(&format!(
        "\nPeso considerado no cálculo: {}g\n",
        metrics.effective_weight_g
    ));
    out.push_str(&ingredients_line(&label.suspicious_ingredients));
    out.push('\n');
    out
}

fn render_remote(report: &RemoteReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", report.product));
    out.push_str(&format!("{}\n", "=".repeat(report.product.chars().count())));
    out.push_str(&format!("{}\n\n", report.verdict));
    out.push_str(&format!(
        "Proteína p/ Scoop: {}g (em {}g)\n",
        report.protein_per_scoop_g, report.scoop_g
    ));
    out.push_str(&format!("Concentração:      {}\n", report.concentration));
    out.push_str(&format!("R$ por g/Prot.:    R$ {:.2}\n", report.cost_per_gram));
    out.push_str(&format!(
        "\nPeso considerado no cálculo: {}g\n",
        report.weight_considered_g
    ));
    out.push_str(&ingredients_line(&report.alerts));
    out.push('\n');
    out
}

fn render_fleet(reading: &FleetReading) -> String {
    let columns = [
        ("prefixo", reading.bus_prefix.clone()),
        ("odometro_km", reading.odometer_km.to_string()),
        ("litros", reading.liters.to_string()),
        ("numero_bomba", reading.pump_number.clone()),
        ("data", reading.date.clone()),
        ("hora", reading.time.clone()),
    ];
    let widths: Vec<usize> = columns
        .iter()
        .map(|(name, value)| name.chars().count().max(value.chars().count()))
        .collect();

    let mut out = String::new();
    out.push_str("\n✅ Leitura Realizada!\n\n");
    out.push_str(&format!("Prefixo:  {}\n", reading.bus_prefix));
    out.push_str(&format!("Odômetro: {} km\n", reading.odometer_km));
    out.push_str(&format!("Litros:   {} L\n", reading.liters));
    out.push_str(&format!("Bomba:    {}\n", reading.pump_number));
    out.push_str(&format!(
        "\n📅 Registro Automático: {} às {}\n\n",
        reading.date, reading.time
    ));

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((name, _), w)| format!("{:<w$}", name, w = *w))
        .collect();
    let row: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((_, value), w)| format!("{:<w$}", value, w = *w))
        .collect();
    out.push_str(&format!("{}\n", header.join(" | ")));
    out.push_str(&format!("{}\n", row.join(" | ")));
    out
}

pub fn output_label(output_format: OutputFormat, analysis: &LabelAnalysis) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(analysis)?;
        println!("{}", content);
    } else {
        print!("{}", render_label(analysis, std::io::stdout().is_terminal()));
    }
    Ok(())
}

pub fn output_remote(output_format: OutputFormat, report: &RemoteReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(report)?;
        println!("{}", content);
    } else {
        print!("{}", render_remote(report));
    }
    Ok(())
}

pub fn output_fleet(
    output_format: OutputFormat,
    reading: &FleetReading,
    csv_path: Option<&Path>,
    xlsx_path: Option<&Path>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(reading)?;
        println!("{}", content);
    } else {
        print!("{}", render_fleet(reading));
    }

    // Paths go to stderr so JSON output stays parseable
    if let Some(path) = csv_path {
        eprintln!("CSV salvo em {}", path.display());
    }
    if let Some(path) = xlsx_path {
        eprintln!("Planilha salva em {}", path.display());
    }
    Ok(())
}
