#[macro_use]
extern crate log;

use std::{env, error::Error, path::Path, process::ExitCode, time::Instant};

use dialoguer::{theme::ColorfulTheme, Select};
use lin_reg::{
    calculate_predictions, calculate_r_squared, rmse, FeatureSet, LinReg, LinRegError,
    OrdinaryLeastSquares, Params, PolynomialFeatures, RegressionModel, TikhonovRegularization,
};
use nalgebra::DMatrix;

mod records;

const NUM_SYNTHETIC_GAMES: usize = 200;
const SEED: u64 = 42;

fn main() -> ExitCode {
    pretty_env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let records = match env::args().nth(1) {
        Some(path) => records::load_csv(Path::new(&path))?,
        None => {
            info!("no csv given, generating {} synthetic games", NUM_SYNTHETIC_GAMES);
            records::synthetic(NUM_SYNTHETIC_GAMES, SEED)
        }
    };

    let regressors = vec!["Ordinary least squares", "Ridge regression"];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select regressor")
        .items(&regressors)
        .default(0)
        .interact()?;

    let params = Params::default();
    let (coefficients, feature_set) = match e {
        0 => fit_with_fallback(&OrdinaryLeastSquares::from_params(&params), &records, &params)?,
        1 => {
            let params = Params {
                regularization_coeff: 1e-3,
                ..params.clone()
            };
            fit_with_fallback(&TikhonovRegularization::from_params(&params), &records, &params)?
        }
        _ => panic!("invalid selection"),
    };

    let design = PolynomialFeatures::new(feature_set).construct_full_features(&records.inputs)?;
    let fitted = calculate_predictions(&design, &coefficients)?;
    let actual: Vec<f64> = records.scores.column(0).iter().cloned().collect();
    info!(
        "R²: {:.4}, rmse: {:.2}",
        calculate_r_squared(&fitted, &actual, params.zero_tolerance)?,
        rmse(&fitted, &actual)?
    );

    for (name, c) in term_names(&records.predictors, feature_set).iter().zip(&coefficients) {
        println!("{:>32}: {:>12.4}", name, c);
    }

    let model = RegressionModel::from_coefficients(&coefficients, records.inputs.ncols())?;
    let average_player: Vec<f64> = records.inputs.row_mean().iter().cloned().collect();
    debug!("average player over {} predictors: {:?}", model.num_inputs(), average_player);
    println!("expected score of the average player: {:.1}", model.predict(&average_player)?);

    Ok(())
}

/// Fit the configured feature set, falling back to a purely linear model when
/// there are not enough distinct games to pin down the higher order terms
fn fit_with_fallback<R: LinReg>(
    regressor: &R,
    records: &records::GameRecords,
    params: &Params,
) -> Result<(Vec<f64>, FeatureSet), LinRegError> {
    match fit(regressor, &records.inputs, &records.scores, params.feature_set) {
        Err(LinRegError::SingularMatrix { pivot }) if params.feature_set != FeatureSet::Linear => {
            warn!(
                "{:?} model is singular at pivot {}, falling back to linear terms",
                params.feature_set, pivot
            );
            fit(regressor, &records.inputs, &records.scores, FeatureSet::Linear)
                .map(|c| (c, FeatureSet::Linear))
        }
        result => result.map(|c| (c, params.feature_set)),
    }
}

fn fit<R: LinReg>(
    regressor: &R,
    inputs: &DMatrix<f64>,
    scores: &DMatrix<f64>,
    feature_set: FeatureSet,
) -> Result<Vec<f64>, LinRegError> {
    let t0 = Instant::now();
    let design = PolynomialFeatures::new(feature_set).construct_full_features(inputs)?;
    let readout = regressor.fit_readout(&design, scores)?;
    info!("fitting {:?} model took {}us", feature_set, t0.elapsed().as_micros());

    Ok(readout.column(0).iter().cloned().collect())
}

/// Labels of the design columns, in coefficient order
fn term_names(predictors: &[String], feature_set: FeatureSet) -> Vec<String> {
    let mut names = vec!["intercept".to_string()];
    names.extend(predictors.iter().cloned());
    if feature_set == FeatureSet::Linear {
        return names;
    }
    for i in 0..predictors.len() {
        for j in i + 1..predictors.len() {
            names.push(format!("{} * {}", predictors[i], predictors[j]));
        }
    }
    if feature_set == FeatureSet::Quadratic {
        names.extend(predictors.iter().map(|p| format!("{}^2", p)));
    }

    names
}
