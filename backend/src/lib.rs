pub mod analysis;
pub mod config;
pub mod output;
pub mod storage;

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("Analysis: {0}")]
    Analysis(#[from] ::analysis::AnalysisError),

    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serializing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Running task: {0}")]
    Join(#[from] tokio::task::JoinError),
}
