use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("expected a header and at least one data row, found {0} row(s)")]
    NotEnoughRows(usize),
    #[error("row {row} has {found} columns, at least {expected} are required")]
    NotEnoughColumns {
        row: u64,
        found: usize,
        expected: usize,
    },
    #[error("row {row}, column {column}: `{value}` is not a number")]
    InvalidNumber {
        row: u64,
        column: usize,
        value: String,
    },
    #[error(transparent)]
    NdShape(#[from] ndarray::ShapeError),
    #[error(transparent)]
    Core(#[from] clusterview::error::Error),
}
