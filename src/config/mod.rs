use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::classifier::hf_client::HF_API_BASE;
use crate::classifier::gateway::{
    DEFAULT_ASSISTANT_THRESHOLD, DEFAULT_FRAUD_THRESHOLD, DEFAULT_MAX_LENGTH,
};
use crate::classifier::GatewayConfig;

const DEFAULT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Bearer token for /api routes (empty = auth disabled)
    pub api_token: Option<String>,

    // Classifier backend
    pub classifier_enabled: bool,
    pub hf_model_name: String,
    pub hf_api_token: Option<String>,
    pub hf_api_url: String,
    pub classifier_timeout: Duration,

    // Screening
    pub classifier_max_length: usize,
    pub fraud_threshold: f64,
    pub assistant_threshold: f64,
    pub batch_max_items: usize,

    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let fraud_threshold = parse_or("FRAUD_THRESHOLD", DEFAULT_FRAUD_THRESHOLD)?;
        let assistant_threshold = parse_or("ASSISTANT_THRESHOLD", DEFAULT_ASSISTANT_THRESHOLD)?;
        for (key, value) in [
            ("FRAUD_THRESHOLD", fraud_threshold),
            ("ASSISTANT_THRESHOLD", assistant_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{key} must be between 0 and 1, got {value}");
            }
        }

        let log_format = match env::var("LOG_FORMAT").unwrap_or_default().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_or("PORT", 8080)?,
            api_token: non_empty("API_TOKEN"),

            classifier_enabled: parse_or("CLASSIFIER_ENABLED", true)?,
            hf_model_name: env::var("HF_MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.into()),
            hf_api_token: non_empty("HF_API_TOKEN"),
            hf_api_url: env::var("HF_API_URL").unwrap_or_else(|_| HF_API_BASE.into()),
            classifier_timeout: Duration::from_secs(parse_or("CLASSIFIER_TIMEOUT_SECS", 10)?),

            classifier_max_length: parse_or("CLASSIFIER_MAX_LENGTH", DEFAULT_MAX_LENGTH)?,
            fraud_threshold,
            assistant_threshold,
            batch_max_items: parse_or("BATCH_MAX_ITEMS", 500)?,

            log_format,
        })
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            max_length: self.classifier_max_length,
            fraud_threshold: self.fraud_threshold,
            assistant_threshold: self.assistant_threshold,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8080,
            api_token: None,
            classifier_enabled: false,
            hf_model_name: DEFAULT_MODEL.into(),
            hf_api_token: None,
            hf_api_url: HF_API_BASE.into(),
            classifier_timeout: Duration::from_secs(10),
            classifier_max_length: DEFAULT_MAX_LENGTH,
            fraud_threshold: DEFAULT_FRAUD_THRESHOLD,
            assistant_threshold: DEFAULT_ASSISTANT_THRESHOLD,
            batch_max_items: 500,
            log_format: LogFormat::Text,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key}={raw}: {e}")),
        _ => Ok(default),
    }
}
