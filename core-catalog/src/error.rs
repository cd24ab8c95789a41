use bridge_http::HttpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] HttpError),

    #[error("Catalog fetch returned HTTP {status}")]
    Status { status: u16 },

    #[error("Malformed catalog: {0}")]
    Parse(String),

    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("Invalid source state: {0}")]
    State(&'static str),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
