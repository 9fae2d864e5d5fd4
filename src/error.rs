use thiserror::Error;

pub type RatioResult<T> = Result<T, RatioError>;

#[derive(Error, Debug)]
pub enum RatioError {
    #[error("Invalid ratio range: {0}")]
    InvalidRange(String),

    #[error("No candidate columns detected (expected month-named columns without 'Total')")]
    NoCandidateColumns,

    #[error("Required column '{0}' not found")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
