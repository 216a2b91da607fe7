use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    #[error("invalid intent pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("malformed command registry: {0}")]
    Registry(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
