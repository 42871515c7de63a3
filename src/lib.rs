//! `clusterview` turns labeled, high dimensional cluster embeddings into a two dimensional
//! picture.
//!
//! This crate is the shared core of the workspace. It contains the dataset container which
//! travels through every stage, the label type written by the clustering tools, and the
//! traits which connect the stages:
//!
//! * [`Fit`](traits::Fit) learns a model (a scaler, a projection) from a dataset
//! * [`Transformer`](traits::Transformer) and [`Predict`](traits::Predict) apply a model
//! * [`ParamGuard`] validates hyperparameters before fitting
//!
//! The stages themselves live in sibling crates:
//!
//! * `clusterview-datasets`: reads the cluster CSV produced by the clustering tools
//! * `clusterview-preprocessing`: standard scaling
//! * `clusterview-reduction`: principal component analysis
//! * `clusterview-plot`: scatter plot rendering
//! * `clusterview-pipeline`: the `clusterview` binary tying them together

pub mod dataset;
pub mod error;
mod param_guard;
pub mod prelude;
pub mod traits;

pub use dataset::{ClusterId, Dataset, DatasetBase, DatasetView, Float, Label};
pub use param_guard::ParamGuard;
