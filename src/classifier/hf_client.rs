use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::backend::{ClassifierError, ClassifierLoader, TextClassifier};
use super::types::{InferenceParameters, InferenceRequest, InferenceResponse, LabelScore};

pub const HF_API_BASE: &str = "https://api-inference.huggingface.co";

/// Text used to confirm the model answers before it is marked ready.
const WARM_UP_TEXT: &str = "payment request";

/// Hugging Face Inference API client for text-classification models.
#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    http: Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_token,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }

    async fn infer(
        &self,
        text: &str,
        max_length: usize,
        wait_for_model: bool,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        let body = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                truncation: true,
                max_length,
            },
        };

        let mut req = self.http.post(self.endpoint()).json(&body);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }
        if wait_for_model {
            req = req.header("x-wait-for-model", "true");
        }

        let resp = req.send().await?.error_for_status()?;
        let parsed: InferenceResponse = resp.json().await?;
        let ranked = parsed.into_ranked();

        if ranked.is_empty() {
            return Err(ClassifierError::Unexpected(format!(
                "model {} returned no labels",
                self.model
            )));
        }

        Ok(ranked)
    }
}

#[async_trait]
impl TextClassifier for HuggingFaceClient {
    async fn classify(
        &self,
        text: &str,
        max_length: usize,
    ) -> Result<Vec<LabelScore>, ClassifierError> {
        self.infer(text, max_length, false).await
    }
}

/// Builds a [`HuggingFaceClient`] and checks the model responds once.
#[derive(Debug, Clone)]
pub struct HuggingFaceLoader {
    base_url: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HuggingFaceLoader {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_token,
            timeout,
        }
    }
}

#[async_trait]
impl ClassifierLoader for HuggingFaceLoader {
    async fn load(&self) -> Result<Arc<dyn TextClassifier>, ClassifierError> {
        let http = Client::builder().timeout(self.timeout).build()?;
        let client = HuggingFaceClient::new(
            http,
            self.base_url.clone(),
            self.model.clone(),
            self.api_token.clone(),
        );

        let probe = client.infer(WARM_UP_TEXT, 32, true).await?;
        tracing::debug!(
            model = %client.model(),
            top_label = %probe[0].label,
            "Warm-up classification succeeded"
        );

        Ok(Arc::new(client))
    }
}
