//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, NdFloat};

use num_traits::{FromPrimitive, NumCast};

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::iter::Sum;

mod cluster_id;
mod impl_dataset;
mod impl_records;
mod impl_targets;

pub use cluster_id::ClusterId;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in the records of a
/// dataset and in every fitted model.
pub trait Float:
    NdFloat + FromPrimitive + Default + Sum + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. They are only used to group samples, never
/// in any numerical computation.
pub trait Label: PartialEq + Eq + Hash + Clone {}

impl Label for bool {}
impl Label for usize {}
impl Label for i64 {}
impl Label for String {}
impl Label for () {}
impl Label for &str {}
impl Label for ClusterId {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the
/// data, one target per record and optional feature names. Only the records take part in the
/// computation; the targets ride along so that every stage keeps them aligned with the rows.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array with one label per sample, or `()` for none
/// * `feature_names`: optional descriptive feature names with dimensionality (nfeatures)
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,

    feature_names: Vec<String>,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and a single label per record, stored as an `Array1`.
pub type Dataset<D, L> = DatasetBase<Array2<D>, Array1<L>>;

/// DatasetView
///
/// A read only view of a Dataset
pub type DatasetView<'a, D, L> = DatasetBase<ArrayView2<'a, D>, ArrayView1<'a, L>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Get the labels in all targets
pub trait Labels {
    type Elem: Label;

    /// Number of occurences of every label
    fn label_count(&self) -> HashMap<Self::Elem, usize>;

    fn label_set(&self) -> HashSet<Self::Elem> {
        self.label_count().into_keys().collect()
    }
}
