use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::types::LabelScore;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),

    #[error("classifier backend is unavailable")]
    Unavailable,
}

/// A learned text-classification backend.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Score `text`, returning labels ranked highest confidence first.
    async fn classify(&self, text: &str, max_length: usize)
        -> Result<Vec<LabelScore>, ClassifierError>;
}

/// One-shot initialization hook for a backend.
#[async_trait]
pub trait ClassifierLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn TextClassifier>, ClassifierError>;
}
