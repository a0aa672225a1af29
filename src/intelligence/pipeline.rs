use std::time::Instant;

use chrono::Utc;
use metrics::{counter, histogram};

use crate::classifier::ClassifierGateway;
use crate::intelligence::rules::{
    first_match, is_location_suspicious, is_valid_upi_format, model_flagged_verdict,
    safe_verdict, POST_MODEL_RULES, PRE_MODEL_RULES,
};
use crate::models::{CandidateReport, Verdict};

/// Screen a candidate through the full chain:
/// 1. Local pre-model rules (length, blacklist, patterns, name)
/// 2. Learned classifier (or its fallback heuristic)
/// 3. Local post-model rules (format, bank handle)
/// 4. Safe
///
/// The first step that fires decides the verdict.
pub async fn evaluate_candidate(candidate: &str, gateway: &ClassifierGateway) -> Verdict {
    let start = Instant::now();
    let verdict = screen(candidate, gateway).await;

    counter!("verdicts_total", "status" => verdict.status.as_str()).increment(1);
    histogram!("pipeline_latency_seconds").record(start.elapsed().as_secs_f64());

    verdict
}

async fn screen(candidate: &str, gateway: &ClassifierGateway) -> Verdict {
    if let Some(rule) = first_match(PRE_MODEL_RULES, candidate) {
        tracing::debug!(rule = rule.name, status = %rule.status, "Local rule fired");
        return rule.verdict();
    }

    if gateway.classify(candidate).await {
        tracing::debug!("Classifier flagged candidate");
        return model_flagged_verdict();
    }

    if let Some(rule) = first_match(POST_MODEL_RULES, candidate) {
        tracing::debug!(rule = rule.name, status = %rule.status, "Local rule fired");
        return rule.verdict();
    }

    safe_verdict()
}

/// Verdict plus the side signals the check endpoint reports.
pub async fn check_candidate(candidate: &str, gateway: &ClassifierGateway) -> CandidateReport {
    let verdict = evaluate_candidate(candidate, gateway).await;

    CandidateReport {
        verdict,
        location_alert: is_location_suspicious(candidate),
        valid_format: is_valid_upi_format(candidate),
        checked_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::GatewayConfig;
    use crate::intelligence::rules::{MSG_BAD_FORMAT, MSG_MODEL_FLAGGED, MSG_SAFE};
    use crate::models::VerdictStatus;

    fn heuristic_gateway() -> ClassifierGateway {
        ClassifierGateway::fallback_only(GatewayConfig::default())
    }

    #[tokio::test]
    async fn test_safe_id_with_unavailable_classifier() {
        let verdict = evaluate_candidate("rahul@sbi", &heuristic_gateway()).await;
        assert_eq!(verdict.status, VerdictStatus::Safe);
        assert_eq!(verdict.message, MSG_SAFE);
    }

    #[tokio::test]
    async fn test_classifier_runs_before_format_check() {
        // no '@', but the long digit run trips the fallback heuristic first
        let verdict = evaluate_candidate("9876543210", &heuristic_gateway()).await;
        assert_eq!(verdict.status, VerdictStatus::Fraud);
        assert_eq!(verdict.message, MSG_MODEL_FLAGGED);

        let verdict = evaluate_candidate("rahulsbi", &heuristic_gateway()).await;
        assert_eq!(verdict.message, MSG_BAD_FORMAT);
    }

    #[tokio::test]
    async fn test_report_carries_side_signals() {
        let report = check_candidate("paytm.me/rahul", &heuristic_gateway()).await;
        assert!(report.location_alert);
        assert!(!report.valid_format);
        assert_eq!(report.verdict.status, VerdictStatus::Fraud);

        let report = check_candidate("rahul@sbi", &heuristic_gateway()).await;
        assert!(!report.location_alert);
        assert!(report.valid_format);
    }
}
