use once_cell::sync::Lazy;
use regex::Regex;

/// Local heuristic used whenever the learned model cannot answer. Broader
/// than the candidate rules: adds lure words and long digit runs.
static FALLBACK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)scam|fake|fraud|invalid|bogus|phishing",
        r"(?i)test\d*|dummy|random\d+",
        r"[0-9]{6,}",
        r"(?i)free|winner|lucky|gift",
        r"(?i)urgent|emergency|immediate",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("fallback pattern"))
    .collect()
});

/// Returns true if any fallback pattern matches `text`.
pub fn is_suspicious(text: &str) -> bool {
    FALLBACK_PATTERNS.iter().any(|re| re.is_match(text))
}
