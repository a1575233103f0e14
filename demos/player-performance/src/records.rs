use std::{error::Error, path::Path};

use lin_reg::matrix_ops::from_rows;
use nalgebra::DMatrix;
use nanorand::{Rng, WyRand};

/// Per-game statistics of players, the last column being the achieved score
pub(crate) struct GameRecords {
    /// Names of the predictor columns
    pub(crate) predictors: Vec<String>,
    /// One row per game, one column per predictor
    pub(crate) inputs: DMatrix<f64>,
    /// Achieved score of each game as a single column
    pub(crate) scores: DMatrix<f64>,
}

/// Load records from a csv file with a header row.
/// Every column is a finite number and the last one is the score.
pub(crate) fn load_csv(path: &Path) -> Result<GameRecords, Box<dyn Error>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut predictors: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if predictors.len() < 2 {
        return Err(format!("expected at least one predictor and a score column in {:?}", path).into());
    }
    predictors.pop();

    let mut inputs: Vec<Vec<f64>> = vec![];
    let mut scores: Vec<Vec<f64>> = vec![];
    for result in rdr.records() {
        let record = result?;
        let mut row = record
            .iter()
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<f64>, _>>()?;
        if row.iter().any(|v| !v.is_finite()) {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(format!("non-finite value on line {} of {:?}", line, path).into());
        }
        let score = row.pop().ok_or("empty record")?;
        inputs.push(row);
        scores.push(vec![score]);
    }
    info!("loaded {} games from {:?}", inputs.len(), path);

    Ok(GameRecords {
        predictors,
        inputs: from_rows(&inputs)?,
        scores: from_rows(&scores)?,
    })
}

/// Generate games where the score depends on accuracy and shots per minute,
/// including an interaction between the two, plus some noise
pub(crate) fn synthetic(num_games: usize, seed: u64) -> GameRecords {
    let mut rng = WyRand::new_seed(seed);

    let mut inputs: DMatrix<f64> = DMatrix::zeros(num_games, 2);
    let mut scores: DMatrix<f64> = DMatrix::zeros(num_games, 1);
    for i in 0..num_games {
        let accuracy = 0.1 + rng.generate::<f64>() * 0.6;
        let shots_per_minute = 10.0 + rng.generate::<f64>() * 30.0;
        let noise = (rng.generate::<f64>() * 2.0 - 1.0) * 50.0;

        inputs[(i, 0)] = accuracy;
        inputs[(i, 1)] = shots_per_minute;
        scores[(i, 0)] = 500.0 + 2000.0 * accuracy + 30.0 * shots_per_minute
            + 40.0 * accuracy * shots_per_minute
            - 0.5 * shots_per_minute * shots_per_minute
            + noise;
    }

    GameRecords {
        predictors: vec!["accuracy".to_string(), "shots_per_minute".to_string()],
        inputs,
        scores,
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use super::*;

    #[test]
    fn synthetic_is_seeded() {
        let a = synthetic(20, 7);
        let b = synthetic(20, 7);

        assert_eq!(a.inputs, b.inputs);
        assert_eq!(a.scores, b.scores);
        assert_eq!(a.inputs.shape(), (20, 2));
        assert_eq!(a.scores.shape(), (20, 1));
    }

    #[test]
    fn load_csv_splits_score_column() {
        let path = env::temp_dir().join("player_performance_load_csv.csv");
        fs::write(&path, "accuracy,hits,score\n0.5,10,1200\n0.25, 4,800\n").unwrap();

        let records = load_csv(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(records.predictors, vec!["accuracy".to_string(), "hits".to_string()]);
        assert_eq!(records.inputs, DMatrix::from_row_slice(2, 2, &[0.5, 10.0, 0.25, 4.0]));
        assert_eq!(records.scores, DMatrix::from_vec(2, 1, vec![1200.0, 800.0]));
    }

    #[test]
    fn load_csv_rejects_non_finite() {
        let path = env::temp_dir().join("player_performance_non_finite.csv");
        fs::write(&path, "accuracy,score\n0.5,1200\nNaN,800\n0.25,inf\n").unwrap();

        let result = load_csv(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }

    #[test]
    fn load_csv_rejects_non_numeric() {
        let path = env::temp_dir().join("player_performance_non_numeric.csv");
        fs::write(&path, "accuracy,score\nhigh,1200\n").unwrap();

        let result = load_csv(&path);
        fs::remove_file(&path).unwrap();

        assert!(result.is_err());
    }
}
