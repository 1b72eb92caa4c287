use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TiqError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    Parse(String),

    #[error("Could not resolve symbol from input: {0}")]
    SymbolNotFound(String),

    #[error("No data found for {0}")]
    NoData(String),
}

impl From<reqwest::Error> for TiqError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            TiqError::Api {
                code: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TiqError::Parse(err.to_string())
        } else {
            TiqError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TiqError {
    fn from(err: serde_json::Error) -> Self {
        TiqError::Parse(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
