//! Error definitions for preprocessing
use thiserror::Error;
pub type Result<T> = std::result::Result<T, PreprocessingError>;

#[derive(Error, Debug, Clone)]
pub enum PreprocessingError {
    #[error("not enough samples")]
    NotEnoughSamples,
    #[error("non-finite value at row {row}, column {column}")]
    NonFiniteValue { row: usize, column: usize },
    #[error("features {0:?} have zero variance")]
    ConstantFeatures(Vec<usize>),
    #[error(transparent)]
    Core(#[from] clusterview::error::Error),
}
