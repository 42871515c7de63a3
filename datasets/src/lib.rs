//! `clusterview-datasets` reads and writes the labeled cluster files exchanged between the
//! clustering tools and the `clusterview` pipeline.
//!
//! ## File layout
//!
//! A cluster file is a comma separated text file. The first row is a header and is always
//! discarded; the clustering tools write `i,cluster id` there, so it usually has fewer fields
//! than the data rows. Every data row has at least ten columns:
//!
//! | column | content |
//! |--------|---------|
//! | 0 | running index, ignored |
//! | 1 | cluster label, `-1` for points without a cluster |
//! | 2..=9 | the eight coordinates of the point |
//!
//! Values may be padded with whitespace, the tools right-align them.
//!
//! ## Using a dataset
//!
//! ```no_run
//! use clusterview::dataset::Records;
//!
//! let dataset = clusterview_datasets::load_clusters("ids.csv").unwrap();
//! println!("{} points with {} dimensions", dataset.nsamples(), dataset.nfeatures());
//! ```

mod dataset;
mod error;
#[cfg(feature = "generate")]
pub mod generate;

pub use dataset::{load_clusters, load_clusters_with, write_clusters, CsvLayout, FEATURE_DIM};
pub use error::{DatasetError, Result};
