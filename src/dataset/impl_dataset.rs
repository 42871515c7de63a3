use std::collections::HashMap;

use super::{DatasetBase, DatasetView, Float, Label, Labels, Records};
use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};

/// Implementation without constraints on records and targets
///
/// This implementation block provides methods for the creation and mutation of datasets. This
/// includes swapping the records, or updating the feature names.
impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }

    /// Updates the records of a dataset
    ///
    /// This function overwrites the records in a dataset. It also invalidates the feature
    /// names, as the features of the new records are not the same.
    pub fn with_records<U: Records>(self, records: U) -> DatasetBase<U, T> {
        DatasetBase {
            records,
            targets: self.targets,
            feature_names: Vec::new(),
        }
    }

    /// Updates the feature names of a dataset
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> DatasetBase<R, T> {
        self.feature_names = names.into_iter().map(|x| x.into()).collect();

        self
    }

    /// Returns feature names
    ///
    /// A feature name gives a human-readable string describing the purpose of a single feature.
    /// This allow the reader to understand its purpose while analysing results, for example
    /// correlation analysis or feature importance. Features without a name are called
    /// `feature-{index}`.
    pub fn feature_names(&self) -> Vec<String> {
        if !self.feature_names.is_empty() {
            self.feature_names.clone()
        } else {
            (0..self.records.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }
}

impl<F, L, D, S> DatasetBase<ArrayBase<D, Ix2>, ArrayBase<S, Ix1>>
where
    D: Data<Elem = F>,
    S: Data<Elem = L>,
{
    /// Create a new dataset, checking that there is exactly one target per record
    pub fn try_new(records: ArrayBase<D, Ix2>, targets: ArrayBase<S, Ix1>) -> Result<Self> {
        if records.nsamples() != targets.len() {
            return Err(Error::MismatchedShapes(records.nsamples(), targets.len()));
        }

        Ok(DatasetBase::new(records, targets))
    }

    /// Creates a view of a dataset
    pub fn view(&self) -> DatasetView<'_, F, L> {
        DatasetBase::new(self.records.view(), self.targets.view())
            .with_feature_names(self.feature_names.clone())
    }
}

impl<R: Records, L: Label, T: Labels<Elem = L>> DatasetBase<R, T> {
    /// Counts the number of samples carrying each label
    pub fn label_frequencies(&self) -> HashMap<L, usize> {
        self.targets.label_count()
    }

    /// Returns the distinct labels in ascending order
    pub fn labels(&self) -> Vec<L>
    where
        L: Ord,
    {
        let mut labels = self.targets.label_set().into_iter().collect::<Vec<_>>();
        labels.sort();
        labels
    }
}

impl<F: Float> From<Array2<F>> for DatasetBase<Array2<F>, ()> {
    fn from(records: Array2<F>) -> Self {
        DatasetBase::new(records, ())
    }
}

impl<F: Float, L> From<(Array2<F>, Array1<L>)> for DatasetBase<Array2<F>, Array1<L>> {
    fn from(rec_tar: (Array2<F>, Array1<L>)) -> Self {
        DatasetBase::new(rec_tar.0, rec_tar.1)
    }
}
