use std::fmt;
use std::sync::Arc;

use metrics::counter;
use serde::Serialize;
use tokio::sync::OnceCell;

use super::backend::{ClassifierError, ClassifierLoader, TextClassifier};
use super::fallback;
use super::types::LabelScore;

pub const DEFAULT_MAX_LENGTH: usize = 512;
/// Top score above which a candidate is screened as suspicious.
pub const DEFAULT_FRAUD_THRESHOLD: f64 = 0.6;
/// Top score above which the assistant gives a label-specific reply.
pub const DEFAULT_ASSISTANT_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GatewayConfig {
    pub max_length: usize,
    pub fraud_threshold: f64,
    pub assistant_threshold: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            fraud_threshold: DEFAULT_FRAUD_THRESHOLD,
            assistant_threshold: DEFAULT_ASSISTANT_THRESHOLD,
        }
    }
}

/// Settled outcome of the one-time backend initialization.
#[derive(Clone)]
pub enum ClassifierState {
    Ready(Arc<dyn TextClassifier>),
    Unavailable,
}

/// Observable lifecycle phase, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierPhase {
    Uninitialized,
    Ready,
    Unavailable,
}

impl ClassifierPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierPhase::Uninitialized => "uninitialized",
            ClassifierPhase::Ready => "ready",
            ClassifierPhase::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for ClassifierPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wraps an optional learned classifier behind a local heuristic.
///
/// The backend is loaded lazily on first use and at most once: concurrent
/// first callers share the same in-flight load, and a failed load pins the
/// gateway to the fallback heuristic for the life of the process. Errors on
/// individual calls after a successful load fall back for that call only.
pub struct ClassifierGateway {
    loader: Option<Arc<dyn ClassifierLoader>>,
    state: OnceCell<ClassifierState>,
    config: GatewayConfig,
}

impl ClassifierGateway {
    pub fn new(loader: Arc<dyn ClassifierLoader>, config: GatewayConfig) -> Self {
        Self {
            loader: Some(loader),
            state: OnceCell::new(),
            config,
        }
    }

    /// A gateway that never loads a backend and always uses the heuristic.
    pub fn fallback_only(config: GatewayConfig) -> Self {
        Self {
            loader: None,
            state: OnceCell::new(),
            config,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn phase(&self) -> ClassifierPhase {
        match self.state.get() {
            None => ClassifierPhase::Uninitialized,
            Some(ClassifierState::Ready(_)) => ClassifierPhase::Ready,
            Some(ClassifierState::Unavailable) => ClassifierPhase::Unavailable,
        }
    }

    /// Settle the backend state, loading it if nobody has yet.
    pub async fn warm_up(&self) -> ClassifierPhase {
        self.state().await;
        self.phase()
    }

    pub async fn is_ready(&self) -> bool {
        matches!(self.state().await, ClassifierState::Ready(_))
    }

    async fn state(&self) -> &ClassifierState {
        self.state.get_or_init(|| self.initialize()).await
    }

    async fn initialize(&self) -> ClassifierState {
        let Some(loader) = &self.loader else {
            tracing::info!("No classifier backend configured, using fallback heuristic");
            counter!("classifier_init_total", "outcome" => "disabled").increment(1);
            return ClassifierState::Unavailable;
        };

        match loader.load().await {
            Ok(backend) => {
                tracing::info!("Classifier backend loaded");
                counter!("classifier_init_total", "outcome" => "ready").increment(1);
                ClassifierState::Ready(backend)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Classifier backend failed to load, fallback heuristic will be used from now on"
                );
                counter!("classifier_init_total", "outcome" => "failed").increment(1);
                ClassifierState::Unavailable
            }
        }
    }

    /// Ranked labels from the backend for `text` (truncated to the configured
    /// maximum length). `Unavailable` when the backend never loaded.
    pub async fn rank(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let ClassifierState::Ready(backend) = self.state().await else {
            return Err(ClassifierError::Unavailable);
        };

        let truncated = truncate_chars(text, self.config.max_length);
        let ranked = backend.classify(truncated, self.config.max_length).await?;
        if ranked.is_empty() {
            return Err(ClassifierError::Unexpected("empty label list".into()));
        }
        Ok(ranked)
    }

    /// True if `text` looks suspicious. Never fails.
    pub async fn classify(&self, text: &str) -> bool {
        match self.rank(text).await {
            Ok(ranked) => {
                counter!("classifier_calls_total", "path" => "model").increment(1);
                let top = &ranked[0];
                let suspicious = top.score > self.config.fraud_threshold;
                tracing::debug!(
                    label = %top.label,
                    score = top.score,
                    suspicious,
                    "Model classification"
                );
                suspicious
            }
            Err(ClassifierError::Unavailable) => {
                counter!("classifier_calls_total", "path" => "fallback").increment(1);
                fallback::is_suspicious(text)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Classifier call failed, using fallback heuristic");
                counter!("classifier_calls_total", "path" => "fallback").increment(1);
                fallback::is_suspicious(text)
            }
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
