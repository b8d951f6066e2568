use insight_core::error::SynthesisError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
}
