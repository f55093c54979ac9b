//! Error taxonomy for the burden core.

use thiserror::Error;

/// Errors raised while loading tables or computing burden chains
#[derive(Debug, Error)]
pub enum BurdenError {
    #[error("Could not parse {field}: '{value}'")]
    Parse { field: &'static str, value: String },

    #[error("No games found for {0}")]
    NoGamesFound(String),

    #[error("Unknown location: {0}")]
    MissingLocation(String),

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BurdenError {
    pub(crate) fn parse(field: &'static str, value: impl Into<String>) -> Self {
        BurdenError::Parse {
            field,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BurdenError>;
