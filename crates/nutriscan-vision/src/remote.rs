//! Client for the external label-analysis service
//!
//! The service does its own extraction and pricing; this side only uploads the
//! photo with the user's price and weight and reads the reply.

use std::time::Duration;

use nutriscan_types::{ConfigError, Error, RemoteReport, Result};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::ai::backend::ImageInput;
use crate::parser::{parse_loose, remote_report_from_fields};

pub const DEFAULT_REMOTE_URL: &str = "http://localhost:8000";

/// Path of the analysis endpoint on the service
pub const ANALYZE_PATH: &str = "/analisar";

pub struct RemoteAnalyzer {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl RemoteAnalyzer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }

    /// Upload one label photo with the user's price (`preco`) and weight (`peso_manual`)
    pub fn analyze(&self, image: &ImageInput, price: f64, manual_weight_g: u32) -> Result<RemoteReport> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.name.clone())
            .mime_str(&image.mime_type)?;
        let form = Form::new()
            .part("file", part)
            .text("preco", price.to_string())
            .text("peso_manual", manual_weight_g.to_string());

        info!(endpoint = %self.endpoint(), image = %image.name, "uploading label to analysis service");
        let response = self.http.post(self.endpoint()).multipart(form).send()?;

        let status = response.status();
        debug!(%status, "analysis service replied");
        if status != StatusCode::OK {
            return Err(Error::ExternalService(format!("Erro no servidor: {}", status)));
        }

        let body = response.text()?;
        let fields = parse_loose(&body)?;
        Ok(remote_report_from_fields(&fields))
    }
}
