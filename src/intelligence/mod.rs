pub mod arithmetic;
pub mod assistant;
pub mod batch;
pub mod pipeline;
pub mod rules;

pub use assistant::assistant_reply;
pub use batch::{analyze_batch, analyze_candidates};
pub use pipeline::{check_candidate, evaluate_candidate};
pub use rules::{evaluate, is_location_suspicious};
