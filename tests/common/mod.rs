use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use fraudwatch::classifier::{
    ClassifierError, ClassifierGateway, ClassifierLoader, GatewayConfig, LabelScore,
    TextClassifier,
};
use fraudwatch::config::AppConfig;
use fraudwatch::AppState;

/// Backend that always answers with one fixed label and score.
pub struct FixedBackend {
    pub label: String,
    pub score: f64,
}

#[async_trait]
impl TextClassifier for FixedBackend {
    async fn classify(
        &self,
        _text: &str,
        _max_length: usize,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        Ok(vec![
            LabelScore {
                label: self.label.clone(),
                score: self.score,
            },
            LabelScore {
                label: "OTHER".into(),
                score: 1.0 - self.score,
            },
        ])
    }
}

/// Backend that flags exactly the texts it was given.
pub struct ListBackend {
    pub flagged: Vec<String>,
}

#[async_trait]
impl TextClassifier for ListBackend {
    async fn classify(
        &self,
        text: &str,
        _max_length: usize,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        let score = if self.flagged.iter().any(|f| f == text) { 0.95 } else { 0.05 };
        Ok(vec![LabelScore {
            label: "NEGATIVE".into(),
            score,
        }])
    }
}

/// Backend whose every call fails.
pub struct BrokenBackend;

#[async_trait]
impl TextClassifier for BrokenBackend {
    async fn classify(
        &self,
        _text: &str,
        _max_length: usize,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        Err(ClassifierError::Unexpected("connection reset".into()))
    }
}

/// Backend that panics on one text and scores everything else as benign.
pub struct PanickingBackend {
    pub trigger: String,
}

#[async_trait]
impl TextClassifier for PanickingBackend {
    async fn classify(
        &self,
        text: &str,
        _max_length: usize,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        if text == self.trigger {
            panic!("backend crashed on {text}");
        }
        Ok(vec![LabelScore {
            label: "NEGATIVE".into(),
            score: 0.05,
        }])
    }
}

/// Loader that counts how often it is invoked.
pub struct CountingLoader {
    pub calls: AtomicUsize,
    backend: Option<Arc<dyn TextClassifier>>,
}

impl CountingLoader {
    #[allow(dead_code)]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            backend: None,
        })
    }

    #[allow(dead_code)]
    pub fn serving(backend: Arc<dyn TextClassifier>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            backend: Some(backend),
        })
    }

    #[allow(dead_code)]
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClassifierLoader for CountingLoader {
    async fn load(&self) -> Result<Arc<dyn TextClassifier>, ClassifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.backend
            .clone()
            .ok_or_else(|| ClassifierError::Unexpected("model could not be fetched".into()))
    }
}

#[allow(dead_code)]
pub fn gateway_with(loader: Arc<CountingLoader>) -> Arc<ClassifierGateway> {
    Arc::new(ClassifierGateway::new(loader, GatewayConfig::default()))
}

#[allow(dead_code)]
pub fn heuristic_gateway() -> Arc<ClassifierGateway> {
    Arc::new(ClassifierGateway::fallback_only(GatewayConfig::default()))
}

/// App state around `gateway` with a default test config.
#[allow(dead_code)]
pub fn test_state(gateway: Arc<ClassifierGateway>, config: AppConfig) -> AppState {
    let metrics_handle =
        fraudwatch::metrics::init_metrics().expect("Failed to install metrics recorder");

    AppState {
        config,
        gateway,
        metrics_handle,
    }
}
