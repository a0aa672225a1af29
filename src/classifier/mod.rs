pub mod backend;
pub mod fallback;
pub mod gateway;
pub mod hf_client;
pub mod types;

pub use backend::{ClassifierError, ClassifierLoader, TextClassifier};
pub use gateway::{ClassifierGateway, ClassifierPhase, ClassifierState, GatewayConfig};
pub use hf_client::{HuggingFaceClient, HuggingFaceLoader};
pub use types::LabelScore;
