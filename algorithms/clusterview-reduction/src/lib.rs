//! # Dimensionality reduction
//!
//! `clusterview-reduction` projects standardized cluster embeddings onto their principal
//! components, see [`Pca`].

mod error;
mod pca;

pub use error::{ReductionError, Result};
pub use pca::{Pca, PcaParams, PcaValidParams};
