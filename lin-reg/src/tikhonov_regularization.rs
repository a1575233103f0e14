use nalgebra::DMatrix;

use crate::{ordinary_least_squares::normal_equations, LinReg, Params, Result};

/// Tikhonov regularization aka ridge regression
/// It is particularly useful to mitigate the problem of multicollinearity in
/// linear regression, e.g. when several gameplay statistics move together
#[derive(Debug, Clone)]
pub struct TikhonovRegularization {
    /// Ridge parameter
    pub regularization_coeff: f64,
    /// Pivot magnitude at or below which the regularized system counts as singular
    pub zero_tolerance: f64,
}

impl TikhonovRegularization {
    pub fn from_params(params: &Params) -> Self {
        Self {
            regularization_coeff: params.regularization_coeff,
            zero_tolerance: params.zero_tolerance,
        }
    }
}

impl LinReg for TikhonovRegularization {
    fn fit_readout(&self, design: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        normal_equations(design, targets, self.regularization_coeff, self.zero_tolerance)
    }
}
