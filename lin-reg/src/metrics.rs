use crate::{LinRegError, Result};

/// Coefficient of determination `1 - SSres / SStot`.
///
/// Returns 1 when the total sum of squares is at or below `zero_tolerance`
/// times the sum of the squared actual values, i.e. when every actual value is
/// the same, whatever the predictions are.
pub fn calculate_r_squared(predictions: &[f64], actual: &[f64], zero_tolerance: f64) -> Result<f64> {
    ensure_same_len(predictions, actual)?;

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot: f64 = actual.iter().map(|y| (y - mean).powi(2)).sum();
    let scale: f64 = actual.iter().map(|y| y * y).sum();
    if ss_tot <= zero_tolerance * scale {
        return Ok(1.0);
    }
    let ss_res: f64 = predictions.iter().zip(actual).map(|(p, y)| (y - p).powi(2)).sum();

    Ok(1.0 - ss_res / ss_tot)
}

/// Root mean square error of the predictions
pub fn rmse(predictions: &[f64], actual: &[f64]) -> Result<f64> {
    ensure_same_len(predictions, actual)?;

    let mse = predictions.iter().zip(actual).map(|(p, y)| (y - p).powi(2)).sum::<f64>()
        / actual.len() as f64;

    Ok(mse.sqrt())
}

fn ensure_same_len(predictions: &[f64], actual: &[f64]) -> Result<()> {
    if actual.is_empty() {
        return Err(LinRegError::EmptyInput);
    }
    if predictions.len() != actual.len() {
        return Err(LinRegError::DimensionMismatch {
            expected: (actual.len(), 1),
            found: (predictions.len(), 1),
        });
    }
    Ok(())
}
