//! # Preprocessing
//!
//! `clusterview-preprocessing` scales the features of a dataset before it is projected. Its
//! only scaler is the standard scaler, which centers every feature and divides it by its
//! standard deviation.
//!
//! Constant features have no spread to divide by. What happens to them is chosen explicitly
//! with [`ZeroVariance`](linear_scaling::ZeroVariance): they are either centered to zero or
//! rejected with an error. They never turn into NaN.

pub mod error;
pub mod linear_scaling;

pub use error::{PreprocessingError, Result};
pub use linear_scaling::{FittedLinearScaler, LinearScaler, ScalingMethod, ZeroVariance};
