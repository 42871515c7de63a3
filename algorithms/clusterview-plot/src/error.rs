use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors raised while building or rendering a scatter plot
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("nothing to plot, the point set is empty")]
    Empty,
    #[error("expected two coordinates per point, got {0}")]
    NotPlanar(usize),
    #[error("{points} points but {labels} labels")]
    LabelCount { points: usize, labels: usize },
    #[error("invalid figure parameters: {0}")]
    InvalidFigure(String),
    #[error("drawing failed: {0}")]
    Drawing(String),
    #[error("could not encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
