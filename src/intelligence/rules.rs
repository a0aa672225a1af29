use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Verdict, VerdictStatus};

/// Candidates shorter than this many characters are not screened.
pub const MIN_CANDIDATE_LEN: usize = 5;

/// Known-fraud identifiers, matched as case-insensitive substrings.
pub const BLACKLIST: &[&str] = &[
    "fraud@upi",
    "scammer@ybl",
    "fakeupi@",
    "random303@ybl",
    "paytm@scam",
    "wrong@upi",
    "test@ybl",
    "dummy@paytm",
];

/// Words that mark the name part of an ID as suspicious.
pub const SUSPICIOUS_NAMES: &[&str] = &[
    "wrong", "invalid", "test", "fake", "fraud", "scam", "random", "unknown", "dummy",
];

/// Substrings of legitimate bank / PSP handles.
pub const BANK_HANDLES: &[&str] = &[
    "sbi", "hdfc", "icici", "axis", "kotak", "ybl", "okicici", "okhdfcbank", "upi",
];

static SUSPICIOUS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)test",
        r"(?i)dummy",
        r"(?i)paytm(00|999)",
        r"(?i)upi123",
        r"(?i)freegift",
        r"(?i)fake",
        r"(?i)wrong",
        r"(?i)scam",
        r"(?i)random\d+",
        r"(?i)qwerty",
        r"(?i)asdf",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("suspicious pattern"))
    .collect()
});

static SHORT_LINK_DOMAINS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"paytm\.me|bit\.ly|linktr\.ee|tinyurl\.com|up\.to").expect("short link pattern")
});

static UPI_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9]+$").expect("upi format pattern"));

pub const MSG_TOO_SHORT: &str = "Please enter a valid UPI ID or link.";
pub const MSG_BLACKLISTED: &str = "This UPI ID matches a known fraud database.";
pub const MSG_SUSPICIOUS_PATTERN: &str =
    "This UPI ID or link looks suspicious. Avoid sending money before verification.";
pub const MSG_SUSPICIOUS_NAME: &str =
    "This UPI ID contains suspicious keywords. Verify before proceeding.";
pub const MSG_MODEL_FLAGGED: &str =
    "AI analysis indicates this UPI ID might be suspicious. Please verify carefully.";
pub const MSG_BAD_FORMAT: &str = "Invalid UPI ID format. UPI IDs must contain '@' symbol.";
pub const MSG_UNUSUAL_HANDLE: &str =
    "Unusual bank handle detected. Verify this UPI ID before proceeding.";
pub const MSG_SAFE: &str = "No fraud detected. Always double-check before transferring money.";

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// A single screening rule: if `fires` returns true, the candidate gets
/// `status` with `message` and no later rule runs.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub fires: fn(&str) -> bool,
    pub status: VerdictStatus,
    pub message: &'static str,
}

impl Rule {
    pub fn verdict(&self) -> Verdict {
        Verdict::new(self.status, self.message)
    }
}

/// Rules that run before the learned model is consulted.
pub const PRE_MODEL_RULES: &[Rule] = &[
    Rule {
        name: "too_short",
        fires: is_too_short,
        status: VerdictStatus::Unknown,
        message: MSG_TOO_SHORT,
    },
    Rule {
        name: "blacklist",
        fires: is_blacklisted,
        status: VerdictStatus::Fraud,
        message: MSG_BLACKLISTED,
    },
    Rule {
        name: "suspicious_pattern",
        fires: matches_suspicious_pattern,
        status: VerdictStatus::Fraud,
        message: MSG_SUSPICIOUS_PATTERN,
    },
    Rule {
        name: "suspicious_name",
        fires: has_suspicious_name,
        status: VerdictStatus::Fraud,
        message: MSG_SUSPICIOUS_NAME,
    },
];

/// Rules that run after the learned model found nothing.
pub const POST_MODEL_RULES: &[Rule] = &[
    Rule {
        name: "missing_separator",
        fires: lacks_separator,
        status: VerdictStatus::Fraud,
        message: MSG_BAD_FORMAT,
    },
    Rule {
        name: "unusual_bank_handle",
        fires: has_unusual_bank_handle,
        status: VerdictStatus::Fraud,
        message: MSG_UNUSUAL_HANDLE,
    },
];

/// First rule in `rules` that fires on `candidate`, in table order.
pub fn first_match(rules: &'static [Rule], candidate: &str) -> Option<&'static Rule> {
    rules.iter().find(|rule| (rule.fires)(candidate))
}

/// Screen a candidate with the local rules only.
pub fn evaluate(candidate: &str) -> Verdict {
    first_match(PRE_MODEL_RULES, candidate)
        .or_else(|| first_match(POST_MODEL_RULES, candidate))
        .map(Rule::verdict)
        .unwrap_or_else(safe_verdict)
}

pub fn safe_verdict() -> Verdict {
    Verdict::new(VerdictStatus::Safe, MSG_SAFE)
}

pub fn model_flagged_verdict() -> Verdict {
    Verdict::new(VerdictStatus::Fraud, MSG_MODEL_FLAGGED)
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Text before the first `@` (the whole string if there is none).
pub fn local_part(candidate: &str) -> &str {
    candidate.split('@').next().unwrap_or(candidate)
}

/// Text between the first and second `@`, if any.
pub fn domain_part(candidate: &str) -> Option<&str> {
    candidate.split('@').nth(1)
}

pub fn is_too_short(candidate: &str) -> bool {
    candidate.chars().count() < MIN_CANDIDATE_LEN
}

pub fn is_blacklisted(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    BLACKLIST.iter().any(|entry| lower.contains(entry))
}

pub fn matches_suspicious_pattern(candidate: &str) -> bool {
    SUSPICIOUS_PATTERNS.iter().any(|re| re.is_match(candidate))
}

pub fn has_suspicious_name(candidate: &str) -> bool {
    let name = local_part(candidate).to_lowercase();
    SUSPICIOUS_NAMES.iter().any(|word| name.contains(word))
}

pub fn lacks_separator(candidate: &str) -> bool {
    !candidate.contains('@')
}

/// True if `domain` contains any known bank handle.
pub fn is_known_bank_handle(domain: &str) -> bool {
    let lower = domain.to_lowercase();
    BANK_HANDLES.iter().any(|handle| lower.contains(handle))
}

/// An empty handle (`name@`) is left alone; only a present, unrecognised
/// handle fires.
pub fn has_unusual_bank_handle(candidate: &str) -> bool {
    match domain_part(candidate) {
        Some(domain) if !domain.is_empty() => !is_known_bank_handle(domain),
        _ => false,
    }
}

/// Short-link or link-in-bio domain. Shown next to the verdict, never
/// changes it.
pub fn is_location_suspicious(candidate: &str) -> bool {
    SHORT_LINK_DOMAINS.is_match(&candidate.to_lowercase())
}

/// Strict `name@handle` shape.
pub fn is_valid_upi_format(candidate: &str) -> bool {
    UPI_FORMAT.is_match(candidate)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
