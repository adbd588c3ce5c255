//! Command handlers

use crate::cli::{Cli, Commands, OutputFormat};
use crate::output::{output_fleet, output_label, output_remote};
use indicatif::{ProgressBar, ProgressStyle};
use nutriscan_app::app::{analyze_label_photo, analyze_label_remote, record_refuelling, FleetRequest, LabelRequest};
use nutriscan_app::config::Config;
use nutriscan_app::export::{export_fleet_to_excel, write_fleet_csv};
use nutriscan_domain::model::FleetPhotos;
use nutriscan_types::Result;
use nutriscan_vision::{Credentials, GeminiClient, RemoteAnalyzer};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref model) = cli.model {
        config.model = model.clone();
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Label { image, price, weight } => {
            let request = LabelRequest::new(image)
                .with_price(price.unwrap_or(config.default_price))
                .with_manual_weight(weight.unwrap_or(config.default_weight_g));
            cmd_label(&config, &request, output_format)
        }

        Commands::LabelRemote {
            image,
            price,
            weight,
            url,
        } => {
            if let Some(url) = url {
                config.remote_url = url;
            }
            let request = LabelRequest::new(image)
                .with_price(price.unwrap_or(config.default_price))
                .with_manual_weight(weight.unwrap_or(config.default_weight_g));
            cmd_label_remote(&config, &request, output_format)
        }

        Commands::Fleet {
            layout,
            prefix_photo,
            odometer_photo,
            liters_photo,
            pump_photo,
            out_dir,
            xlsx,
            no_csv,
        } => {
            let request = FleetRequest {
                layout: layout.into(),
                photos: FleetPhotos {
                    prefix: prefix_photo,
                    odometer: odometer_photo,
                    liters: liters_photo,
                    pump: pump_photo,
                },
            };
            let out_dir = if no_csv { None } else { Some(out_dir) };
            cmd_fleet(&config, &request, out_dir, xlsx, output_format)
        }

        Commands::Config {
            show,
            set_model,
            set_api_base,
            set_remote_url,
            set_timeout,
            set_output,
            set_price,
            set_weight,
            reset,
        } => cmd_config(
            show,
            set_model,
            set_api_base,
            set_remote_url,
            set_timeout,
            set_output,
            set_price,
            set_weight,
            reset,
        ),
    }
}

/// Spinner on stderr while `work` runs
fn with_spinner<T>(message: &str, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = work();
    spinner.finish_and_clear();
    result
}

fn gemini_client(config: &Config) -> Result<GeminiClient> {
    let client = GeminiClient::new(Credentials::from_env()?, config.gemini_options())?;
    debug!(model = client.model(), "vision backend ready");
    Ok(client)
}

fn cmd_label(config: &Config, request: &LabelRequest, output_format: OutputFormat) -> Result<()> {
    let client = gemini_client(config)?;
    let analysis = with_spinner("Lendo o rótulo...", || analyze_label_photo(&client, request))?;
    output_label(output_format, &analysis)
}

fn cmd_label_remote(config: &Config, request: &LabelRequest, output_format: OutputFormat) -> Result<()> {
    let remote = RemoteAnalyzer::new(config.remote_url.clone(), config.timeout())?;
    debug!(endpoint = %remote.endpoint(), "remote analyzer ready");
    let report = with_spinner("Enviando para análise...", || analyze_label_remote(&remote, request))?;
    output_remote(output_format, &report)
}

fn cmd_fleet(
    config: &Config,
    request: &FleetRequest,
    out_dir: Option<PathBuf>,
    xlsx: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let client = gemini_client(config)?;
    let message = format!("Analisando as {} imagens...", request.layout.photo_count());
    let reading = with_spinner(&message, || record_refuelling(&client, request))?;

    let csv_path = match out_dir {
        Some(dir) => Some(write_fleet_csv(&reading, request.layout, &dir)?),
        None => None,
    };
    if let Some(ref path) = xlsx {
        export_fleet_to_excel(&reading, path)?;
    }

    output_fleet(output_format, &reading, csv_path.as_deref(), xlsx.as_deref())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    show: bool,
    set_model: Option<String>,
    set_api_base: Option<String>,
    set_remote_url: Option<String>,
    set_timeout: Option<u64>,
    set_output: Option<OutputFormat>,
    set_price: Option<f64>,
    set_weight: Option<u32>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(model) = set_model {
        config.model = model;
        modified = true;
    }

    if let Some(api_base) = set_api_base {
        config.api_base_url = api_base;
        modified = true;
    }

    if let Some(remote_url) = set_remote_url {
        config.remote_url = remote_url;
        modified = true;
    }

    if let Some(timeout_secs) = set_timeout {
        config.timeout_secs = timeout_secs;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(price) = set_price {
        config.default_price = price;
        modified = true;
    }

    if let Some(weight) = set_weight {
        config.default_weight_g = weight;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_types::{Error, ErrorKind};

    #[test]
    fn test_spinner_passes_result_through() {
        let value = with_spinner("ok", || Ok(7)).unwrap();
        assert_eq!(value, 7);

        let err = with_spinner::<()>("fail", || Err(Error::Validation("x".into()))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
