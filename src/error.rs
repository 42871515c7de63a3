//! Error types in clusterview
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("records and targets disagree on the number of samples: {0} != {1}")]
    MismatchedShapes(usize, usize),
}
