use std::panic::AssertUnwindSafe;

use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::ClassifierGateway;
use crate::intelligence::rules::{domain_part, is_known_bank_handle};
use crate::models::BatchResult;

static BATCH_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(test|fake|scam|wrong|dummy|random|freegift)").expect("batch keyword pattern")
});

/// Split pasted text on whitespace, commas and semicolons.
pub fn split_candidates(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Lighter per-item check used for batches. Any local hit short-circuits;
/// otherwise the classifier decides.
pub async fn is_suspect(candidate: &str, gateway: &ClassifierGateway) -> bool {
    let Some(domain) = domain_part(candidate) else {
        return true;
    };
    if !is_known_bank_handle(domain) {
        return true;
    }
    if BATCH_KEYWORDS.is_match(candidate) {
        return true;
    }

    gateway.classify(candidate).await
}

/// Split `raw` and screen every candidate in it. See [`analyze_candidates`].
pub async fn analyze_batch(raw: &str, gateway: &ClassifierGateway) -> BatchResult {
    analyze_candidates(split_candidates(raw), gateway).await
}

/// Screen already-split candidates concurrently and tally the results.
///
/// A candidate whose check panics is counted as suspicious; the rest of the
/// batch still completes.
pub async fn analyze_candidates(
    candidates: Vec<String>,
    gateway: &ClassifierGateway,
) -> BatchResult {
    let total = candidates.len();

    let mut pending: FuturesUnordered<_> = candidates
        .into_iter()
        .map(|candidate| async move {
            let outcome = AssertUnwindSafe(is_suspect(&candidate, gateway))
                .catch_unwind()
                .await;
            let suspicious = match outcome {
                Ok(suspicious) => {
                    let label = if suspicious { "suspicious" } else { "safe" };
                    counter!("batch_items_total", "outcome" => label).increment(1);
                    suspicious
                }
                Err(_) => {
                    tracing::error!(candidate = %candidate, "Batch item check failed, counting as suspicious");
                    counter!("batch_items_total", "outcome" => "failed").increment(1);
                    true
                }
            };
            (candidate, suspicious)
        })
        .collect();

    let mut result = BatchResult::default();
    while let Some((candidate, suspicious)) = pending.next().await {
        result.record(candidate, suspicious);
    }

    tracing::info!(
        total,
        safe = result.safe_count,
        suspicious = result.suspicious_count,
        "Batch analyzed"
    );

    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::GatewayConfig;

    fn heuristic_gateway() -> ClassifierGateway {
        ClassifierGateway::fallback_only(GatewayConfig::default())
    }

    #[test]
    fn test_split_candidates() {
        let parts = split_candidates(" a@sbi, test@ybl;fake@hdfc\n\tb@axis ,, ; ");
        assert_eq!(parts, vec!["a@sbi", "test@ybl", "fake@hdfc", "b@axis"]);
        assert!(split_candidates(" ,;\n ").is_empty());
    }

    #[tokio::test]
    async fn test_is_suspect_local_checks() {
        let gw = heuristic_gateway();
        assert!(is_suspect("nobankhandle", &gw).await);
        assert!(is_suspect("alice@", &gw).await);
        assert!(is_suspect("alice@unknownbank", &gw).await);
        assert!(is_suspect("randomguy@ybl", &gw).await);
        assert!(!is_suspect("a@sbi", &gw).await);
    }

    #[tokio::test]
    async fn test_mixed_batch() {
        let result = analyze_batch("a@sbi, test@ybl; fake@hdfc", &heuristic_gateway()).await;

        assert_eq!(result.safe_count, 1);
        assert_eq!(result.suspicious_count, 2);
        assert_eq!(result.details.safe, vec!["a@sbi"]);
        assert!(result.details.suspicious.contains(&"test@ybl".to_string()));
        assert!(result.details.suspicious.contains(&"fake@hdfc".to_string()));
    }

    #[tokio::test]
    async fn test_counts_cover_every_candidate() {
        let raw = "a@sbi b@hdfc c@nowhere 12345678@ybl d@kotak lucky@axis e@ybl e@ybl";
        let result = analyze_batch(raw, &heuristic_gateway()).await;

        assert_eq!(result.total(), 8);
        let mut seen: Vec<String> = result
            .details
            .safe
            .iter()
            .chain(result.details.suspicious.iter())
            .cloned()
            .collect();
        seen.sort();
        let mut expected = split_candidates(raw);
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_analyze_candidates_keeps_duplicates() {
        let candidates = vec!["a@sbi".to_string(), "a@sbi".to_string(), "x@nowhere".to_string()];
        let result = analyze_candidates(candidates, &heuristic_gateway()).await;

        assert_eq!(result.safe_count, 2);
        assert_eq!(result.details.suspicious, vec!["x@nowhere"]);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let result = analyze_batch("  ", &heuristic_gateway()).await;
        assert_eq!(result, BatchResult::default());
    }
}
