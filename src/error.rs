use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Error string supplied by the server in a failure body.
    #[error("{0}")]
    Server(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Http(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
