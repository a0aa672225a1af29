use serde::{Deserialize, Serialize};

/// One label/score pair returned by a text-classification backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Inference API request body.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest<'a> {
    pub inputs: &'a str,
    pub parameters: InferenceParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct InferenceParameters {
    pub truncation: bool,
    pub max_length: usize,
}

/// The Inference API wraps single-input results in an extra array for some
/// pipelines and not for others; accept both.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    /// Flatten to a single list, highest score first.
    pub fn into_ranked(self) -> Vec<LabelScore> {
        let mut scores = match self {
            InferenceResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
            InferenceResponse::Flat(scores) => scores,
        };
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));
        scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_response_is_ranked() {
        let raw = r#"[[{"label":"NEGATIVE","score":0.12},{"label":"POSITIVE","score":0.88}]]"#;
        let parsed: InferenceResponse = serde_json::from_str(raw).unwrap();
        let ranked = parsed.into_ranked();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].label, "POSITIVE");
        assert!((ranked[0].score - 0.88).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flat_response_is_accepted() {
        let raw = r#"[{"label":"LABEL_1","score":0.3},{"label":"LABEL_0","score":0.7}]"#;
        let parsed: InferenceResponse = serde_json::from_str(raw).unwrap();
        let ranked = parsed.into_ranked();

        assert_eq!(ranked[0].label, "LABEL_0");
        assert_eq!(ranked[1].label, "LABEL_1");
    }

    #[test]
    fn test_empty_nested_response() {
        let parsed: InferenceResponse = serde_json::from_str("[]").unwrap();
        assert!(parsed.into_ranked().is_empty());
    }

    #[test]
    fn test_request_serializes_truncation_options() {
        let body = InferenceRequest {
            inputs: "rahul@sbi",
            parameters: InferenceParameters {
                truncation: true,
                max_length: 512,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["inputs"], "rahul@sbi");
        assert_eq!(json["parameters"]["truncation"], true);
        assert_eq!(json["parameters"]["max_length"], 512);
    }
}
