pub mod api;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod intelligence;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use crate::classifier::ClassifierGateway;
use crate::config::AppConfig;

pub use intelligence::{analyze_batch, assistant_reply, evaluate, evaluate_candidate};
pub use models::{BatchResult, Verdict, VerdictStatus};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub gateway: Arc<ClassifierGateway>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

/// True if `text` looks suspicious to the classifier (or its fallback).
pub async fn classify_text(text: &str, gateway: &ClassifierGateway) -> bool {
    gateway.classify(text).await
}
