use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioAnalyticsError {
    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PortfolioAnalyticsError>;
