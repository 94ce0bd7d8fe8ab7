use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream returned {0}")]
    Upstream(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Malformed upstream data: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
