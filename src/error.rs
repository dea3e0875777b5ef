use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("window is not available")]
    WindowNotAvailable,
    #[error("document is not available")]
    DocumentNotAvailable,
    #[error("toggle has no preceding password input")]
    MissingPasswordInput,
    #[error("element preceding the toggle is not an input")]
    NotAnInput,
    #[error("failed to register event listener: {0}")]
    Listener(String),
    #[error("invalid runtime config")]
    Config(#[from] serde_json::Error),
    #[error("failed to install log subscriber: {0}")]
    Telemetry(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
