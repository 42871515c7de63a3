//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};

/// Transformation algorithms
///
/// A transformer takes a dataset or a matrix and returns a transformed version of it. Fitted
/// scalers are transformers.
pub trait Transformer<R, T> {
    fn transform(&self, x: R) -> T;
}

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For
/// example a principal component analysis fits an orthogonal basis and the standard scaler
/// fits per-feature offsets and scales.
///
/// The error type `E` must be convertible from the core error, so that parameter checking
/// failures can be reported through the algorithm's own error.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model
///
/// Applies a fitted model to new records, for example a projection onto principal components.
pub trait Predict<R, T> {
    fn predict(&self, x: R) -> T;
}
