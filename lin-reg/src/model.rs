//! Fitted regression models and their evaluation.
//!
//! A flat coefficient vector is laid out as
//! `[intercept, linear..., interactions..., squares...]`, where the linear
//! terms follow input order, the interactions follow `(i, j)` with `i < j` in
//! lexicographic order and the squares follow input order again.
//! A vector shorter than the full expansion is truncated, never wrapped, so a
//! purely linear fit evaluates the same way as a quadratic one with the higher
//! terms dropped.

use nalgebra::DMatrix;

use crate::{
    matrix_ops::multiply, FeatureSet, LinReg, LinRegError, PolynomialFeatures, Result,
};

/// A fitted model with its coefficients grouped by term kind
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel {
    num_inputs: usize,
    intercept: f64,
    linear: Vec<f64>,
    interactions: Vec<f64>,
    squares: Vec<f64>,
}

impl RegressionModel {
    /// Split a flat coefficient vector into its term groups.
    /// Coefficients beyond the full quadratic expansion are ignored.
    ///
    /// # Arguments:
    /// coefficients: Flat coefficients, index 0 being the intercept
    /// num_inputs: Number of raw predictors the model is evaluated on
    pub fn from_coefficients(coefficients: &[f64], num_inputs: usize) -> Result<Self> {
        let (intercept, mut rest) = coefficients.split_first().ok_or(LinRegError::EmptyInput)?;

        let mut take = |n: usize| {
            let (head, tail) = rest.split_at(n.min(rest.len()));
            rest = tail;
            head.to_vec()
        };
        let linear = take(num_inputs);
        let interactions = take(num_pairs(num_inputs));
        let squares = take(num_inputs);
        if !rest.is_empty() {
            debug!("ignoring {} trailing coefficients", rest.len());
        }

        Ok(Self {
            num_inputs,
            intercept: *intercept,
            linear,
            interactions,
            squares,
        })
    }

    /// Expand the raw inputs, fit them with the given regressor and group the
    /// resulting coefficients
    ///
    /// # Arguments:
    /// regressor: The linear regression being used
    /// raw_inputs: One row per observation, one column per predictor, no intercept column
    /// targets: A single column with one row per observation
    /// feature_set: The polynomial terms to fit
    pub fn fit<R: LinReg>(
        regressor: &R,
        raw_inputs: &DMatrix<f64>,
        targets: &DMatrix<f64>,
        feature_set: FeatureSet,
    ) -> Result<Self> {
        if targets.ncols() != 1 {
            return Err(LinRegError::DimensionMismatch {
                expected: (raw_inputs.nrows(), 1),
                found: targets.shape(),
            });
        }
        let design = PolynomialFeatures::new(feature_set).construct_full_features(raw_inputs)?;
        let readout = regressor.fit_readout(&design, targets)?;
        let coefficients: Vec<f64> = readout.column(0).iter().cloned().collect();

        Self::from_coefficients(&coefficients, raw_inputs.ncols())
    }

    /// Flatten back into the positional layout
    pub fn coefficients(&self) -> Vec<f64> {
        std::iter::once(self.intercept)
            .chain(self.linear.iter().cloned())
            .chain(self.interactions.iter().cloned())
            .chain(self.squares.iter().cloned())
            .collect()
    }

    /// Evaluate the model for one observation
    pub fn predict(&self, inputs: &[f64]) -> Result<f64> {
        if inputs.len() != self.num_inputs {
            return Err(LinRegError::DimensionMismatch {
                expected: (1, self.num_inputs),
                found: (1, inputs.len()),
            });
        }

        let linear: f64 = self.linear.iter().zip(inputs).map(|(c, x)| c * x).sum();
        let interactions: f64 = self
            .interactions
            .iter()
            .zip(pairs(inputs.len()))
            .map(|(c, (i, j))| c * inputs[i] * inputs[j])
            .sum();
        let squares: f64 = self.squares.iter().zip(inputs).map(|(c, x)| c * x * x).sum();

        Ok(self.intercept + linear + interactions + squares)
    }

    #[inline(always)]
    pub fn num_inputs(&self) -> usize {
        self.num_inputs
    }

    #[inline(always)]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    #[inline(always)]
    pub fn linear(&self) -> &[f64] {
        &self.linear
    }

    #[inline(always)]
    pub fn interactions(&self) -> &[f64] {
        &self.interactions
    }

    #[inline(always)]
    pub fn squares(&self) -> &[f64] {
        &self.squares
    }
}

/// Evaluate a flat coefficient vector for one observation.
/// See the module docs for the coefficient layout.
pub fn calculate_regression_prediction(inputs: &[f64], coefficients: &[f64]) -> Result<f64> {
    RegressionModel::from_coefficients(coefficients, inputs.len())?.predict(inputs)
}

/// Plain dot product of every design row with the coefficients, without
/// generating interaction or square terms
///
/// # Arguments:
/// design: One row per observation, including the intercept column if the model has one
/// coefficients: One coefficient per design column
pub fn calculate_predictions(design: &DMatrix<f64>, coefficients: &[f64]) -> Result<Vec<f64>> {
    if coefficients.is_empty() {
        return Err(LinRegError::EmptyInput);
    }
    let readout = DMatrix::from_column_slice(coefficients.len(), 1, coefficients);

    Ok(multiply(design, &readout)?.iter().cloned().collect())
}

#[inline(always)]
fn num_pairs(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}
