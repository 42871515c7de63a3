//! Linear Scaling methods

use std::fmt;

use crate::error::{PreprocessingError, Result};
use clusterview::dataset::{DatasetBase, Records};
use clusterview::traits::{Fit, Transformer};
use clusterview::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2, Zip};
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Possible scaling methods for [LinearScaler](struct.LinearScaler.html)
///
/// * Standard (with mean, with std): subtracts the mean to each feature and scales it by the inverse of its standard deviation
pub enum ScalingMethod {
    Standard(bool, bool),
}

impl fmt::Display for ScalingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalingMethod::Standard(with_mean, with_std) => write!(
                f,
                "Standard scaler (with_mean = {}, with_std = {})",
                with_mean, with_std
            ),
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Treatment of features whose standard deviation is zero
pub enum ZeroVariance {
    /// Center the feature but leave it unscaled, every value becomes zero
    Center,
    /// Fail fitting with [`PreprocessingError::ConstantFeatures`]
    Reject,
}

impl Default for ZeroVariance {
    fn default() -> Self {
        ZeroVariance::Center
    }
}

/// Linear Scaler: learns scaling parameters, according to the specified [method](enum.ScalingMethod.html), from a dataset, producing a [fitted linear scaler](struct.FittedLinearScaler.html)
/// that can be used to scale different datasets using the same parameters.
///
///
/// ### Example
///
/// ```rust
/// use clusterview::traits::{Fit, Transformer};
/// use clusterview::DatasetBase;
/// use clusterview_preprocessing::linear_scaling::LinearScaler;
/// use ndarray::array;
///
/// let dataset = DatasetBase::from(array![[1., 10.], [2., 20.], [3., 30.]]);
/// // Learn scaling parameters
/// let scaler = LinearScaler::standard().fit(&dataset).unwrap();
/// // scale dataset according to parameters
/// let dataset = scaler.transform(dataset);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearScaler {
    method: ScalingMethod,
    zero_variance: ZeroVariance,
}

impl LinearScaler {
    /// Initializes the scaler with the specified method.
    pub fn new(method: ScalingMethod) -> Self {
        Self {
            method,
            zero_variance: ZeroVariance::default(),
        }
    }

    /// Setter for the scaler method
    pub fn method(mut self, method: ScalingMethod) -> Self {
        self.method = method;
        self
    }

    /// Setter for the treatment of constant features
    pub fn zero_variance(mut self, policy: ZeroVariance) -> Self {
        self.zero_variance = policy;
        self
    }

    /// Initializes a Standard scaler
    pub fn standard() -> Self {
        Self::new(ScalingMethod::Standard(true, true))
    }

    /// Initializes a Standard scaler that does not subract the mean to the features
    pub fn standard_no_mean() -> Self {
        Self::new(ScalingMethod::Standard(false, true))
    }

    /// Initializes a Stadard scaler that does not scale the features by the inverse of the standard deviation
    pub fn standard_no_std() -> Self {
        Self::new(ScalingMethod::Standard(true, false))
    }
}

impl<F: Float, D: Data<Elem = F>, T> Fit<ArrayBase<D, Ix2>, T, PreprocessingError>
    for LinearScaler
{
    type Object = FittedLinearScaler<F>;

    /// Fits the input dataset accordng to the scaler [method](enum.ScalingMethod.html). Will return an error
    /// if the dataset does not contain any samples, contains non-finite values, or (when rejected) has constant features.
    fn fit(&self, x: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        match self.method {
            ScalingMethod::Standard(with_mean, with_std) => {
                FittedLinearScaler::standard(x.records(), with_mean, with_std, self.zero_variance)
            }
        }
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// The result of fitting a [linear scaler](struct.LinearScaler.html).
/// Scales datasets with the parameters learned during fitting.
pub struct FittedLinearScaler<F> {
    offsets: Array1<F>,
    scales: Array1<F>,
    constant_features: Vec<usize>,
    method: ScalingMethod,
}

impl<F: Float> FittedLinearScaler<F> {
    pub(crate) fn standard<D: Data<Elem = F>>(
        records: &ArrayBase<D, Ix2>,
        with_mean: bool,
        with_std: bool,
        zero_variance: ZeroVariance,
    ) -> Result<Self> {
        if records.nsamples() == 0 {
            return Err(PreprocessingError::NotEnoughSamples);
        }
        if let Some((row, column)) = first_non_finite(records) {
            return Err(PreprocessingError::NonFiniteValue { row, column });
        }

        let means = records
            .mean_axis(Axis(0))
            .ok_or(PreprocessingError::NotEnoughSamples)?;
        let std_devs = records.std_axis(Axis(0), F::zero());

        let constant_features = std_devs
            .iter()
            .zip(means.iter())
            .enumerate()
            .filter(|(_, (std, mean))| is_constant(**std, **mean, records.nsamples()))
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>();

        if zero_variance == ZeroVariance::Reject && !constant_features.is_empty() {
            return Err(PreprocessingError::ConstantFeatures(constant_features));
        }

        let scales = if with_std {
            Array1::from_shape_fn(std_devs.len(), |idx| {
                if constant_features.contains(&idx) {
                    // if feature is constant then don't scale
                    F::one()
                } else {
                    F::one() / std_devs[idx]
                }
            })
        } else {
            Array1::ones(records.nfeatures())
        };
        let offsets = if with_mean {
            means
        } else {
            Array1::zeros(records.nfeatures())
        };

        log::debug!(
            "fitted standard scaler on {} samples, constant features {:?}",
            records.nsamples(),
            constant_features
        );

        Ok(Self {
            offsets,
            scales,
            constant_features,
            method: ScalingMethod::Standard(with_mean, with_std),
        })
    }

    /// Array of size `n_features` that contains the offset that will be subtracted to each feature
    pub fn offsets(&self) -> &Array1<F> {
        &self.offsets
    }

    /// Array of size `n_features` that contains the scale that will be applied to each feature
    pub fn scales(&self) -> &Array1<F> {
        &self.scales
    }

    /// Indices of the features which had zero variance during fitting and were left unscaled
    pub fn constant_features(&self) -> &[usize] {
        &self.constant_features
    }

    /// Returns the method used for fitting. Useful for printing, since [ScalingMethod](enum.ScalingMethod.html) implements `Display`
    pub fn method(&self) -> &ScalingMethod {
        &self.method
    }
}

/// A standard deviation counts as zero when it is within the rounding error of the mean
/// computation, which grows with the number of samples and the magnitude of the mean.
fn is_constant<F: Float>(std: F, mean: F, nsamples: usize) -> bool {
    let tolerance = F::cast(nsamples) * F::epsilon() * mean.abs().max(F::one());
    std <= tolerance
}

fn first_non_finite<F: Float, D: Data<Elem = F>>(
    records: &ArrayBase<D, Ix2>,
) -> Option<(usize, usize)> {
    records
        .indexed_iter()
        .find(|(_, x)| !x.is_finite())
        .map(|(idx, _)| idx)
}

impl<F: Float> Transformer<Array2<F>, Array2<F>> for FittedLinearScaler<F> {
    /// Scales an array of size (nsamples, nfeatures) according to the scaler's `offsets` and `scales`.
    /// Panics if the shape of the input array is not compatible with the shape of the dataset used for fitting.
    fn transform(&self, x: Array2<F>) -> Array2<F> {
        if x.is_empty() {
            return x;
        }
        let mut x = x;
        Zip::from(x.columns_mut())
            .and(self.offsets())
            .and(self.scales())
            .for_each(|mut col, &offset, &scale| {
                col.mapv_inplace(|el| (el - offset) * scale);
            });

        // centered constant features are exactly zero, not the rounding error of their mean
        if let ScalingMethod::Standard(true, _) = self.method {
            for &idx in &self.constant_features {
                x.column_mut(idx).fill(F::zero());
            }
        }
        x
    }
}

impl<F: Float, D: Data<Elem = F>, T> Transformer<DatasetBase<ArrayBase<D, Ix2>, T>, DatasetBase<Array2<F>, T>>
    for FittedLinearScaler<F>
{
    /// Substitutes the records of the dataset with their scaled version, keeping the feature names.
    /// Panics if the shape of the records is not compatible with the shape of the dataset used for fitting.
    fn transform(&self, x: DatasetBase<ArrayBase<D, Ix2>, T>) -> DatasetBase<Array2<F>, T> {
        let feature_names = x.feature_names();
        let transformed_records = self.transform(x.records.to_owned());
        x.with_records(transformed_records)
            .with_feature_names(feature_names)
    }
}
