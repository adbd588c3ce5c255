//! Gemini `generateContent` client
//!
//! One blocking request per call: the prompt first, then every image as
//! base64 inline data, in order.

use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use nutriscan_types::{ConfigError, Error, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::backend::{ImageInput, VisionBackend};

/// Environment variable holding the API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

pub const DEFAULT_MODEL: &str = "gemini-flash-latest";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// API credentials, built once at startup and handed to the client
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(ConfigError::MissingApiKey(GEMINI_API_KEY_ENV.to_string()).into());
        }
        Ok(Self { api_key })
    }

    /// Read the key from [`GEMINI_API_KEY_ENV`]
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(GEMINI_API_KEY_ENV)
            .map_err(|_| ConfigError::MissingApiKey(GEMINI_API_KEY_ENV.to_string()))?;
        Self::new(key)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Client settings
#[derive(Debug, Clone)]
pub struct GeminiOptions {
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Default for GeminiOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiOptions {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
    options: GeminiOptions,
}

impl GeminiClient {
    pub fn new(credentials: Credentials, options: GeminiOptions) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("HTTP client: {}", e)))?;
        Ok(Self {
            http,
            credentials,
            options,
        })
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.options.api_base.trim_end_matches('/'),
            self.options.model
        )
    }
}

impl VisionBackend for GeminiClient {
    fn send_prompt(&self, prompt: &str, images: &[ImageInput]) -> Result<String> {
        let body = build_request_body(prompt, images);
        info!(model = %self.options.model, images = images.len(), "sending extraction request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", self.credentials.api_key.as_str())
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        debug!(%status, bytes = text.len(), "model response received");

        if !status.is_success() {
            let truncated: String = text.chars().take(500).collect();
            return Err(Error::ExternalService(format!(
                "API error {}: {}",
                status, truncated
            )));
        }

        let value: Value = serde_json::from_str(&text)
            .map_err(|e| Error::ExternalService(format!("unreadable model response: {}", e)))?;

        match response_text(&value) {
            Some(answer) => Ok(answer),
            None => Err(Error::ExternalService(empty_response_reason(&value))),
        }
    }
}

/// `generateContent` request body: prompt part followed by image parts
pub fn build_request_body(prompt: &str, images: &[ImageInput]) -> Value {
    let mut parts = vec![json!({ "text": prompt })];
    parts.extend(images.iter().map(|img| {
        json!({
            "inline_data": {
                "mime_type": img.mime_type,
                "data": general_purpose::STANDARD.encode(&img.bytes),
            }
        })
    }));
    json!({ "contents": [{ "parts": parts }] })
}

/// Concatenated text of the first candidate, `None` when there is no text
pub fn response_text(body: &Value) -> Option<String> {
    let parts = body["candidates"][0]["content"]["parts"].as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn empty_response_reason(body: &Value) -> String {
    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return format!("empty response from model (blocked: {})", reason);
    }
    if let Some(reason) = body["candidates"][0]["finishReason"].as_str() {
        return format!("empty response from model (finish reason: {})", reason);
    }
    "empty response from model".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutriscan_types::ErrorKind;

    fn image(mime: &str, bytes: &[u8]) -> ImageInput {
        ImageInput {
            name: "foto".to_string(),
            mime_type: mime.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_request_body_orders_prompt_then_images() {
        let body = build_request_body(
            "leia",
            &[image("image/jpeg", b"abc"), image("image/png", b"xyz")],
        );
        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["text"], "leia");
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/jpeg");
        assert_eq!(parts[1]["inline_data"]["data"], "YWJj");
        assert_eq!(parts[2]["inline_data"]["mime_type"], "image/png");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "```json\n{" }, { "text": "}\n```" }] } }]
        });
        assert_eq!(response_text(&body).unwrap(), "```json\n{}\n```");
    }

    #[test]
    fn test_response_text_empty() {
        assert!(response_text(&json!({})).is_none());
        let blank = json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] });
        assert!(response_text(&blank).is_none());
    }

    #[test]
    fn test_empty_reason_mentions_block() {
        let body = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        assert!(empty_response_reason(&body).contains("SAFETY"));
    }

    #[test]
    fn test_credentials_reject_blank_key() {
        let err = Credentials::new("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_credentials_debug_redacts() {
        let creds = Credentials::new("secret-key").unwrap();
        assert!(!format!("{:?}", creds).contains("secret-key"));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(
            Credentials::new("k").unwrap(),
            GeminiOptions::default().with_api_base("http://127.0.0.1:9/"),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-flash-latest:generateContent"
        );
    }
}
