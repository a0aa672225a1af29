pub mod batch;
pub mod verdict;

pub use batch::{BatchDetails, BatchResult};
pub use verdict::{Verdict, VerdictStatus};

use chrono::{DateTime, Utc};
use serde::Serialize;

// ---------------------------------------------------------------------------
// CandidateReport — what the check endpoint returns
// ---------------------------------------------------------------------------

/// A verdict plus the signals that are shown next to it but never change it.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    #[serde(flatten)]
    pub verdict: Verdict,
    /// Candidate points at a URL shortener or link-in-bio domain.
    pub location_alert: bool,
    /// Candidate has the strict `name@handle` shape.
    pub valid_format: bool,
    pub checked_at: DateTime<Utc>,
}
