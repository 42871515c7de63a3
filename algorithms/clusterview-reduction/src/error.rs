use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReductionError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReductionError {
    #[error("At least 1 sample needed")]
    NotEnoughSamples,
    #[error("Target dimension of the projection must be positive")]
    NonPositiveEmbeddingSize,
    #[error("Target dimension {0} is larger than the number of features {1}.")]
    DimensionIncrease(usize, usize),
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    #[error(transparent)]
    Core(#[from] clusterview::error::Error),
}
