use thiserror::Error;

#[derive(Error, Debug)]
pub enum SparcedError {
    #[error("Model name is empty")]
    EmptyModelName,
    #[error("Invalid model name '{name}': {reason}")]
    InvalidModelName { name: String, reason: String },
    #[error("Unknown parameter '{0}'")]
    UnknownParameter(String),
    #[error("Unknown species '{0}'")]
    UnknownSpecies(String),
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid value {value} for {what}")]
    InvalidValue { what: String, value: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Malformed reaction network: {0}")]
    Network(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error reading CSV: {0}")]
    Csv(#[from] csv::Error),
    #[cfg(feature = "dylib")]
    #[error("Error loading model library: {0}")]
    Library(#[from] libloading::Error),
    #[cfg(feature = "dylib")]
    #[error("Model library {path} was built with version {found}, expected {expected}")]
    IncompatibleModel {
        path: String,
        found: String,
        expected: String,
    },
}

impl SparcedError {
    pub(crate) fn dimension(what: &'static str, expected: usize, found: usize) -> Self {
        SparcedError::DimensionMismatch {
            what,
            expected,
            found,
        }
    }
}
