//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use nutriscan_domain::model::FleetLayout;
use std::path::PathBuf;

pub use nutriscan_types::OutputFormat;

/// Number of photos in a fleet capture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Prefix, odometer, pump (liters and pump number on one photo)
    #[default]
    Three,
    /// Prefix, odometer, liters, pump number
    Four,
}

impl From<LayoutArg> for FleetLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Three => FleetLayout::Three,
            LayoutArg::Four => FleetLayout::Four,
        }
    }
}

#[derive(Parser)]
#[command(name = "nutriscan")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Supplement price check and fleet refuelling log from photos")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Model name override
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a nutrition label and judge the price per gram of protein
    Label {
        /// Photo of the nutrition table
        image: Option<PathBuf>,

        /// Container price in R$. Uses config value if not specified.
        #[arg(long, short = 'p')]
        price: Option<f64>,

        /// Container weight in grams (0 = read from label). Uses config value if not specified.
        #[arg(long, short = 'w')]
        weight: Option<u32>,
    },

    /// Send a label photo to the external analysis service
    LabelRemote {
        /// Photo of the nutrition table
        image: Option<PathBuf>,

        /// Container price in R$. Uses config value if not specified.
        #[arg(long, short = 'p')]
        price: Option<f64>,

        /// Container weight in grams. Uses config value if not specified.
        #[arg(long, short = 'w')]
        weight: Option<u32>,

        /// Service base URL. Uses config value if not specified.
        #[arg(long)]
        url: Option<String>,
    },

    /// Build a refuelling record from bus, dashboard, and pump photos
    Fleet {
        /// Photo layout
        #[arg(long, value_enum, default_value_t = LayoutArg::Three)]
        layout: LayoutArg,

        /// Bus exterior showing the prefix
        #[arg(long)]
        prefix_photo: Option<PathBuf>,

        /// Dashboard showing the odometer
        #[arg(long)]
        odometer_photo: Option<PathBuf>,

        /// Pump display showing liters (four-photo layout)
        #[arg(long)]
        liters_photo: Option<PathBuf>,

        /// Pump showing the pump or nozzle number
        #[arg(long)]
        pump_photo: Option<PathBuf>,

        /// Directory for the CSV row
        #[arg(long, short = 'o', default_value = ".")]
        out_dir: PathBuf,

        /// Also write the row to this .xlsx file
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Do not write the CSV row
        #[arg(long)]
        no_csv: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set model
        #[arg(long)]
        set_model: Option<String>,

        /// Set model API base URL
        #[arg(long)]
        set_api_base: Option<String>,

        /// Set external analysis service URL
        #[arg(long)]
        set_remote_url: Option<String>,

        /// Set request timeout in seconds
        #[arg(long)]
        set_timeout: Option<u64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set default price (R$)
        #[arg(long)]
        set_price: Option<f64>,

        /// Set default container weight (g)
        #[arg(long)]
        set_weight: Option<u32>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
