use nalgebra::DMatrix;

use crate::{LinRegError, Result};

/// Which groups of polynomial terms are generated from the raw inputs.
/// Groups are cumulative and always appear in the order listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureSet {
    /// Intercept and linear terms
    Linear,
    /// Linear terms followed by every pairwise product `x_i * x_j` with `i < j`
    Interactions,
    /// Interactions followed by the squares `x_i^2`
    Quadratic,
}

/// Expands raw predictor rows into a design matrix whose column order is the
/// one [`RegressionModel`](crate::RegressionModel) consumes coefficients in
#[derive(Debug, Clone)]
pub struct PolynomialFeatures {
    feature_set: FeatureSet,
}

impl PolynomialFeatures {
    pub fn new(feature_set: FeatureSet) -> Self {
        Self { feature_set }
    }

    /// Construct the full design matrix from the raw inputs
    ///
    /// # Arguments
    /// raw: Number of rows are the observations and number of columns
    /// are the predictors of each observation
    pub fn construct_full_features(&self, raw: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        if raw.is_empty() {
            return Err(LinRegError::EmptyInput);
        }
        let d_lin = raw.ncols();

        let mut full_features = DMatrix::from_element(raw.nrows(), self.d_total(d_lin), 1.0);
        let mut col = 1;
        for i in 0..d_lin {
            full_features.set_column(col, &raw.column(i));
            col += 1;
        }
        if self.feature_set == FeatureSet::Linear {
            return Ok(full_features);
        }

        for i in 0..d_lin {
            for j in i + 1..d_lin {
                full_features.set_column(col, &raw.column(i).component_mul(&raw.column(j)));
                col += 1;
            }
        }
        if self.feature_set == FeatureSet::Quadratic {
            for i in 0..d_lin {
                full_features.set_column(col, &raw.column(i).map(|v| v * v));
                col += 1;
            }
        }

        Ok(full_features)
    }

    /// Total number of design columns, the intercept included
    pub fn d_total(&self, d_lin: usize) -> usize {
        let d_pairs = d_lin * d_lin.saturating_sub(1) / 2;
        match self.feature_set {
            FeatureSet::Linear => 1 + d_lin,
            FeatureSet::Interactions => 1 + d_lin + d_pairs,
            FeatureSet::Quadratic => 1 + 2 * d_lin + d_pairs,
        }
    }
}
