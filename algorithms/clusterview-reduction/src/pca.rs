//! Principal Component Analysis
//!
//! Principal Component Analysis is a common technique for data and dimensionality reduction. It
//! reduces the dimensionality of the data while retaining most of the variance. This is done by
//! projecting the centered data onto the eigenvectors of its covariance matrix with the largest
//! eigenvalues. The symmetric eigendecomposition comes from `linfa-linalg` and runs without a
//! LAPACK backend.
//!
//! Eigenvectors are only defined up to their sign. Every component is oriented such that its
//! largest loading (in absolute value) is positive, which makes repeated fits on the same data
//! return identical projections.
//!
//! # Example
//!
//! ```
//! use clusterview::traits::{Fit, Predict};
//! use clusterview::DatasetBase;
//! use clusterview_reduction::Pca;
//! use ndarray::array;
//!
//! let dataset = DatasetBase::from(array![[1., 2., 0.], [2., 4., 1.], [3., 6., 0.], [4., 8., 1.]]);
//!
//! // apply PCA projection along a line which maximizes the spread of the data
//! let embedding = Pca::params(1).fit(&dataset).unwrap();
//!
//! // reduce dimensionality of the dataset
//! let dataset = embedding.predict(dataset);
//! assert_eq!(dataset.records().dim(), (4, 1));
//! ```
//!
use clusterview::{
    dataset::{DatasetBase, Records},
    traits::{Fit, Predict},
    Float, ParamGuard,
};
use linfa_linalg::eigh::Eigh;
use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix2};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::error::{ReductionError, Result};

/// Pincipal Component Analysis parameters
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcaValidParams {
    embedding_size: usize,
}

impl PcaValidParams {
    pub fn embedding_size(&self) -> usize {
        self.embedding_size
    }
}

/// Pincipal Component Analysis parameters, not yet checked
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcaParams(PcaValidParams);

impl ParamGuard for PcaParams {
    type Checked = PcaValidParams;
    type Error = ReductionError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.embedding_size == 0 {
            Err(ReductionError::NonPositiveEmbeddingSize)
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Fit a PCA model given a dataset
///
/// The Principal Component Analysis takes the records of a dataset and tries to find the best
/// fit in a lower dimensional space such that the maximal variance is retained.
///
/// # Parameters
///
/// * `dataset`: A dataset with records in N dimensions
///
/// # Returns
///
/// A fitted PCA model with origin and hyperplane
impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, ReductionError>
    for PcaValidParams
{
    type Object = Pca<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Pca<F>> {
        let x = dataset.records();
        let (nsamples, nfeatures) = x.dim();
        if nsamples == 0 {
            return Err(ReductionError::NotEnoughSamples);
        }
        if self.embedding_size > nfeatures {
            return Err(ReductionError::DimensionIncrease(
                self.embedding_size,
                nfeatures,
            ));
        }

        // calculate mean of data and subtract it
        let mean = x
            .mean_axis(Axis(0))
            .ok_or(ReductionError::NotEnoughSamples)?;
        let x = x - &mean;

        // sample covariance, a single sample has no spread at all
        let dof = F::cast(nsamples.saturating_sub(1).max(1));
        let covariance = x.t().dot(&x) / dof;

        let (eigvals, eigvecs) = if covariance.diag().sum() <= F::zero() {
            log::warn!("data has zero variance, principal components are arbitrary");
            (Array1::zeros(nfeatures), Array2::eye(nfeatures))
        } else {
            sorted_eigh(&covariance)?
        };

        // round-off may produce tiny negative eigenvalues on rank deficient data
        let eigvals = eigvals.mapv(|v| v.max(F::zero()));
        let total_variance = eigvals.sum();

        let mut embedding = eigvecs.slice(s![.., ..self.embedding_size]).t().to_owned();
        for mut component in embedding.rows_mut() {
            if largest_loading(&component.view()) < F::zero() {
                component.mapv_inplace(|v| -v);
            }
        }

        let explained_variance = eigvals.slice(s![..self.embedding_size]).to_owned();
        let singular_values = explained_variance.mapv(|v| (v * dof).sqrt());

        log::debug!(
            "fitted PCA with {} of {} components on {} samples",
            self.embedding_size,
            nfeatures,
            nsamples
        );

        Ok(Pca {
            embedding,
            explained_variance,
            singular_values,
            total_variance,
            mean,
        })
    }
}

/// Eigendecomposition of a symmetric matrix with eigenvalues in descending order
fn sorted_eigh<F: Float>(matrix: &Array2<F>) -> Result<(Array1<F>, Array2<F>)> {
    let (vals, vecs) = matrix.eigh()?;

    let mut order = (0..vals.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| vals[b].partial_cmp(&vals[a]).unwrap_or(std::cmp::Ordering::Equal));

    let sorted_vals = order.iter().map(|&i| vals[i]).collect::<Array1<_>>();
    let sorted_vecs = vecs.select(Axis(1), &order);

    Ok((sorted_vals, sorted_vecs))
}

/// Returns the entry with the largest magnitude, keeping its sign
fn largest_loading<F: Float>(component: &ndarray::ArrayView1<F>) -> F {
    component
        .iter()
        .fold(F::zero(), |acc, &v| if v.abs() > acc.abs() { v } else { acc })
}

/// Fitted Principal Component Analysis model
///
/// The model contains the mean and hyperplane for the projection of data.
///
/// # Example
///
/// ```
/// use clusterview::traits::{Fit, Predict};
/// use clusterview::DatasetBase;
/// use clusterview_reduction::Pca;
/// use ndarray::array;
///
/// let dataset = DatasetBase::from(array![[1., 0., 2.], [0., 1., 1.], [2., 2., 0.], [1., 3., 1.]]);
/// let embedding = Pca::params(2).fit(&dataset).unwrap();
///
/// // both ratios are fractions of the total variance
/// let ratios = embedding.explained_variance_ratio();
/// assert!(ratios.sum() <= 1.0 + 1e-12);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Pca<F> {
    embedding: Array2<F>,
    explained_variance: Array1<F>,
    singular_values: Array1<F>,
    total_variance: F,
    mean: Array1<F>,
}

impl Pca<f64> {
    /// Create default parameter set
    ///
    /// # Parameters
    ///
    ///  * `embedding_size`: the target dimensionality
    pub fn params(embedding_size: usize) -> PcaParams {
        PcaParams(PcaValidParams { embedding_size })
    }
}

impl<F: Float> Pca<F> {
    /// Return the amount of explained variance per element
    pub fn explained_variance(&self) -> Array1<F> {
        self.explained_variance.clone()
    }

    /// Return the fraction of the total variance explained by each retained component
    ///
    /// The total includes the variance of the discarded components, so the ratios sum up to one
    /// only if every component is kept. Data without any variance has all ratios zero.
    pub fn explained_variance_ratio(&self) -> Array1<F> {
        if self.total_variance <= F::zero() {
            return Array1::zeros(self.explained_variance.len());
        }

        self.explained_variance
            .mapv(|v| (v / self.total_variance).min(F::one()))
    }

    /// Return the singular values of the centered data
    pub fn singular_values(&self) -> &Array1<F> {
        &self.singular_values
    }

    /// Principal axes, one component per row
    pub fn components(&self) -> &Array2<F> {
        &self.embedding
    }

    /// Per-feature mean of the training data
    pub fn mean(&self) -> &Array1<F> {
        &self.mean
    }

    /// Total variance of the training data over all components
    pub fn total_variance(&self) -> F {
        self.total_variance
    }
}

/// Project a matrix to lower dimensional space
///
/// The projection first centers and then projects the data.
impl<F: Float, D: Data<Elem = F>> Predict<&ArrayBase<D, Ix2>, Array2<F>> for Pca<F> {
    fn predict(&self, records: &ArrayBase<D, Ix2>) -> Array2<F> {
        (records - &self.mean).dot(&self.embedding.t())
    }
}

impl<F: Float, D: Data<Elem = F>, T> Predict<&DatasetBase<ArrayBase<D, Ix2>, T>, Array2<F>>
    for Pca<F>
{
    fn predict(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Array2<F> {
        self.predict(dataset.records())
    }
}

/// Project the records of a dataset, keeping its targets
impl<F: Float, D: Data<Elem = F>, T>
    Predict<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>> for Pca<F>
{
    fn predict(&self, dataset: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let new_records = self.predict(dataset.records());
        let names = (1..=new_records.nfeatures())
            .map(|i| format!("PC{}", i))
            .collect();

        dataset.with_records(new_records).with_feature_names(names)
    }
}
