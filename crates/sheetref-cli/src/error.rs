use sheetref_core::ReferenceError;
use thiserror::Error;

/// Command-line error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook has no worksheets: {0}")]
    NoWorksheets(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{reference}: {source}")]
    Reference {
        reference: String,
        #[source]
        source: ReferenceError,
    },
}

pub type Result<T> = std::result::Result<T, CliError>;
