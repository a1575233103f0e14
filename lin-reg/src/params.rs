use crate::FeatureSet;

/// Relative tolerance below which pivots and variances are treated as zero
pub const DEFAULT_ZERO_TOLERANCE: f64 = 1e-10;

/// The parameters of a regression fit
#[derive(Debug, Clone)]
pub struct Params {
    /// A pivot in the matrix inversion counts as zero when its magnitude is at
    /// or below this times the largest magnitude in its row. The total sum of
    /// squares in R² counts as degenerate at or below this times the sum of the
    /// squared actual values.
    pub zero_tolerance: f64,
    /// Ridge parameter added to the diagonal of the normal equations.
    /// Zero gives ordinary least squares.
    pub regularization_coeff: f64,
    /// Which polynomial terms are generated from the raw inputs
    pub feature_set: FeatureSet,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
            regularization_coeff: 0.0,
            feature_set: FeatureSet::Quadratic,
        }
    }
}
