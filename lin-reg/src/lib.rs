//! Least-squares regression over small dense matrices, used to predict
//! expected player performance from historical gameplay data.

#[macro_use]
extern crate log;

use nalgebra::DMatrix;

mod error;
mod feature_constructor;
pub mod matrix_ops;
mod metrics;
mod model;
mod ordinary_least_squares;
mod params;
mod tikhonov_regularization;

pub use error::{LinRegError, Result};
pub use feature_constructor::{FeatureSet, PolynomialFeatures};
pub use metrics::{calculate_r_squared, rmse};
pub use model::{calculate_predictions, calculate_regression_prediction, RegressionModel};
pub use ordinary_least_squares::{regression, OrdinaryLeastSquares};
pub use params::{Params, DEFAULT_ZERO_TOLERANCE};
pub use tikhonov_regularization::TikhonovRegularization;

/// Generic way of performing linear regression and fitting the readout matrix
pub trait LinReg: Clone {
    /// Fit a readout matrix, mapping inputs to targets
    ///
    /// # Parameters
    /// design: Input data with one row per observation, where the first column
    /// should be just 1s to get an intercept
    /// targets: Target data having one row per observation and one column per output
    fn fit_readout(&self, design: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}
