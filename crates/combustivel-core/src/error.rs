//! Error types for the fuel cost calculator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Division undefined: {0}")]
    DivisionUndefined(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True when the caller supplied arguments the engine refuses to compute with
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::DivisionUndefined(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
