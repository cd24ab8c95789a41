use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("HTTP operation failed: {0}")]
    OperationFailed(String),
}

pub type Result<T> = std::result::Result<T, HttpError>;
