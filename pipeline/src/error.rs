use std::io;

use clusterview_datasets::DatasetError;
use clusterview_plot::PlotError;
use clusterview_preprocessing::PreprocessingError;
use clusterview_reduction::ReductionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Coarse classification of a pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileAccess,
    Format,
    NumericDegeneracy,
    OutputWrite,
    Parameters,
}

/// Numeric failure of the scaling or projection stage
#[derive(Error, Debug)]
pub enum Degeneracy {
    #[error("standardization failed: {0}")]
    Scaling(#[from] PreprocessingError),
    #[error("projection failed: {0}")]
    Projection(#[from] ReductionError),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("cannot access input file")]
    FileAccess(#[source] DatasetError),
    #[error("malformed input file")]
    Format(#[source] DatasetError),
    #[error(transparent)]
    NumericDegeneracy(#[from] Degeneracy),
    #[error("cannot write the plot")]
    OutputWrite(#[source] PlotError),
    #[error("cannot write the progress report")]
    Console(#[source] io::Error),
    #[error("invalid parameters: {0}")]
    Parameters(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::FileAccess(_) => ErrorKind::FileAccess,
            PipelineError::Format(_) => ErrorKind::Format,
            PipelineError::NumericDegeneracy(_) => ErrorKind::NumericDegeneracy,
            PipelineError::OutputWrite(_) | PipelineError::Console(_) => ErrorKind::OutputWrite,
            PipelineError::Parameters(_) => ErrorKind::Parameters,
        }
    }
}

impl From<DatasetError> for PipelineError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::Io { .. } => PipelineError::FileAccess(err),
            _ => PipelineError::Format(err),
        }
    }
}

impl From<PreprocessingError> for PipelineError {
    fn from(err: PreprocessingError) -> Self {
        PipelineError::NumericDegeneracy(err.into())
    }
}

impl From<ReductionError> for PipelineError {
    fn from(err: ReductionError) -> Self {
        PipelineError::NumericDegeneracy(err.into())
    }
}

impl From<PlotError> for PipelineError {
    fn from(err: PlotError) -> Self {
        match err {
            PlotError::InvalidFigure(msg) => PipelineError::Parameters(msg),
            _ => PipelineError::OutputWrite(err),
        }
    }
}
