use nalgebra::DMatrix;

use crate::{
    matrix_ops::{identity, inverse, multiply, transpose},
    params::DEFAULT_ZERO_TOLERANCE,
    LinReg, LinRegError, Params, Result,
};

/// Least squares via the normal equations `(F'F)^-1 F'Y`
#[derive(Debug, Clone)]
pub struct OrdinaryLeastSquares {
    /// Pivot magnitude at or below which `F'F` counts as singular
    pub zero_tolerance: f64,
}

impl OrdinaryLeastSquares {
    pub fn from_params(params: &Params) -> Self {
        Self {
            zero_tolerance: params.zero_tolerance,
        }
    }
}

impl Default for OrdinaryLeastSquares {
    fn default() -> Self {
        Self {
            zero_tolerance: DEFAULT_ZERO_TOLERANCE,
        }
    }
}

impl LinReg for OrdinaryLeastSquares {
    fn fit_readout(&self, design: &DMatrix<f64>, targets: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        normal_equations(design, targets, 0.0, self.zero_tolerance)
    }
}

/// Fit a single target column and return one coefficient per design column
///
/// # Arguments:
/// design: One row per observation, one column per predictor.
/// Include a column of 1s to get an intercept.
/// targets: The observed values, as a single column with one row per observation
pub fn regression(
    design: &DMatrix<f64>,
    targets: &DMatrix<f64>,
    zero_tolerance: f64,
) -> Result<Vec<f64>> {
    if targets.ncols() != 1 {
        return Err(LinRegError::DimensionMismatch {
            expected: (design.nrows(), 1),
            found: targets.shape(),
        });
    }
    let coefficients = OrdinaryLeastSquares { zero_tolerance }.fit_readout(design, targets)?;

    Ok(coefficients.column(0).iter().cloned().collect())
}

/// Solve `(F'F + ridge * I) B = F'Y` for `B`
pub(crate) fn normal_equations(
    design: &DMatrix<f64>,
    targets: &DMatrix<f64>,
    ridge: f64,
    zero_tolerance: f64,
) -> Result<DMatrix<f64>> {
    if design.nrows() != targets.nrows() {
        return Err(LinRegError::DimensionMismatch {
            expected: (design.nrows(), targets.ncols()),
            found: targets.shape(),
        });
    }
    debug!(
        "fitting {} observations of {} predictors against {} target(s), ridge: {}",
        design.nrows(),
        design.ncols(),
        targets.ncols(),
        ridge
    );

    let design_t = transpose(design)?;
    let g = multiply(&design_t, targets)?;
    let mut h = multiply(&design_t, design)?;
    if ridge != 0.0 {
        h += identity(h.nrows()) * ridge;
    }

    multiply(&inverse(&h, zero_tolerance)?, &g)
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;
    use crate::matrix_ops::from_rows;

    fn rounded(coefficients: Vec<f64>, digits: i32) -> Vec<f64> {
        coefficients.into_iter().map(|v| round(v, digits)).collect()
    }

    #[test]
    fn regression_slope_through_origin() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let design = from_rows(&[vec![1.0, 1.0], vec![1.0, 2.0], vec![1.0, 3.0]]).unwrap();
        let targets = from_rows(&[vec![2.0], vec![4.0], vec![6.0]]).unwrap();

        let coefficients = regression(&design, &targets, DEFAULT_ZERO_TOLERANCE).unwrap();
        assert_eq!(rounded(coefficients, 8), vec![0.0, 2.0]);
    }

    #[test]
    fn regression_recovers_two_predictor_model() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // y = 2 + 3 * x1 - x2
        let xs = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (2.0, 3.0), (4.0, 1.0)];
        let rows: Vec<Vec<f64>> = xs.iter().map(|(x1, x2)| vec![1.0, *x1, *x2]).collect();
        let ys: Vec<Vec<f64>> = xs.iter().map(|(x1, x2)| vec![2.0 + 3.0 * x1 - x2]).collect();

        let coefficients =
            regression(&from_rows(&rows).unwrap(), &from_rows(&ys).unwrap(), DEFAULT_ZERO_TOLERANCE)
                .unwrap();
        info!("coefficients: {:?}", coefficients);

        assert_eq!(rounded(coefficients, 8), vec![2.0, 3.0, -1.0]);
    }

    #[test]
    fn regression_row_count_mismatch() {
        let design = from_rows(&[vec![1.0, 1.0], vec![1.0, 2.0], vec![1.0, 3.0]]).unwrap();
        let targets = from_rows(&[vec![2.0], vec![4.0]]).unwrap();

        assert_eq!(
            regression(&design, &targets, DEFAULT_ZERO_TOLERANCE),
            Err(LinRegError::DimensionMismatch {
                expected: (3, 1),
                found: (2, 1)
            })
        );
    }

    #[test]
    fn regression_requires_single_target_column() {
        let design = from_rows(&[vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap();
        let targets = from_rows(&[vec![2.0, 1.0], vec![4.0, 1.0]]).unwrap();

        assert!(matches!(
            regression(&design, &targets, DEFAULT_ZERO_TOLERANCE),
            Err(LinRegError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn regression_collinear_predictors_are_singular() {
        // second predictor is twice the first
        let design =
            from_rows(&[vec![1.0, 1.0, 2.0], vec![1.0, 2.0, 4.0], vec![1.0, 3.0, 6.0]]).unwrap();
        let targets = from_rows(&[vec![1.0], vec![2.0], vec![3.0]]).unwrap();

        assert!(matches!(
            regression(&design, &targets, DEFAULT_ZERO_TOLERANCE),
            Err(LinRegError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn regression_large_scale_collinear_predictors_are_singular() {
        if let Err(_) = pretty_env_logger::try_init() {}

        // the last predictor is 0.1 * a + 0.7 * b, so F'F only looks invertible
        // through rounding noise that is large in absolute terms
        let mut rows = vec![];
        let mut ys = vec![];
        for i in 0..4 {
            for j in 0..4 {
                let a = 123.4 + 37.1 * i as f64 + 3.3 * j as f64;
                let b = 567.8 + 29.3 * j as f64 + 1.7 * (i * i) as f64;
                rows.push(vec![1.0, a, b, 0.1 * a + 0.7 * b]);
                ys.push(vec![2.0 + a - b]);
            }
        }

        assert_eq!(
            regression(&from_rows(&rows).unwrap(), &from_rows(&ys).unwrap(), DEFAULT_ZERO_TOLERANCE),
            Err(LinRegError::SingularMatrix { pivot: 3 })
        );
    }

    #[test]
    fn fit_readout_multiple_targets() {
        let design = from_rows(&[vec![1.0, 0.0], vec![1.0, 1.0], vec![1.0, 2.0]]).unwrap();
        // columns: y = 1 + x and y = 3 - 2x
        let targets = from_rows(&[vec![1.0, 3.0], vec![2.0, 1.0], vec![3.0, -1.0]]).unwrap();

        let mut readout = OrdinaryLeastSquares::default().fit_readout(&design, &targets).unwrap();
        readout.iter_mut().for_each(|v| *v = round(*v, 8));

        assert_eq!(readout, from_rows(&[vec![1.0, 3.0], vec![1.0, -2.0]]).unwrap());
    }
}
