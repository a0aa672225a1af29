use serde::{Deserialize, Serialize};

/// The two partitions of a batch submission. Order inside each list follows
/// completion order, not input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDetails {
    pub safe: Vec<String>,
    pub suspicious: Vec<String>,
}

/// Tally for one batch submission. Rebuilt per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub safe_count: usize,
    pub suspicious_count: usize,
    pub details: BatchDetails,
}

impl BatchResult {
    pub fn record(&mut self, candidate: String, suspicious: bool) {
        if suspicious {
            self.suspicious_count += 1;
            self.details.suspicious.push(candidate);
        } else {
            self.safe_count += 1;
            self.details.safe.push(candidate);
        }
    }

    pub fn total(&self) -> usize {
        self.safe_count + self.suspicious_count
    }
}
