/// Error types for the synthesis pipeline.
///
/// Faults raised while selecting or composing are never surfaced to callers of
/// `SynthesisPipeline`; they are logged and replaced by a fallback insight.
/// Catalog loading errors are returned so a host can refuse to start.
use crate::model::Category;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("no campaigns available for topic '{topic}'")]
    NoCampaigns { topic: String },

    #[error("no opener phrases configured for category '{0}'")]
    MissingOpeners(Category),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),
}
