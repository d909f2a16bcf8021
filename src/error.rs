pub type DeployResult<T> = Result<T, DeployError>;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("environment variable missing: {0}")]
    EnvMissing(String),

    /// The provider answered with a status outside the 2xx range.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// No response was received (DNS, TLS, connection reset, ...).
    #[error("API error: request failed - {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
