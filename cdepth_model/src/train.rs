use std::fmt;

use cdepth_dataset::FeatureRow;
use tracing::info;

use crate::{
    DepthRegressor, ForestParams, ModelError, RandomForest, Sample, TrainOptions,
    TrainedDepthModel, mean_absolute_error, mean_squared_error, r2_score, train_test_split,
};

/// Held-out accuracy of a freshly trained model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    /// Rows the forest was fitted on.
    pub train_rows: usize,
    /// Rows held out for scoring.
    pub test_rows: usize,
    /// Mean absolute error on the held-out rows.
    pub mae: f64,
    /// Mean squared error on the held-out rows.
    pub mse: f64,
    /// Coefficient of determination on the held-out rows.
    pub r2: f64,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Performance Metrics:")?;
        writeln!(f, " - Mean Absolute Error (MAE): {}", self.mae)?;
        writeln!(f, " - Mean Squared Error (MSE): {}", self.mse)?;
        writeln!(f, " - R-squared (R²): {}", self.r2)?;
        write!(f, " - Rows: {} train / {} test", self.train_rows, self.test_rows)
    }
}

fn labeled(rows: &[FeatureRow]) -> Result<(Vec<Sample>, Vec<f64>), ModelError> {
    rows.iter()
        .map(|row| {
            let depth = row.logic_depth.ok_or_else(|| ModelError::Unlabeled {
                file: row.file.clone(),
                signal: row.signal.clone(),
            })?;
            Ok((row.features().to_array(), f64::from(depth)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|pairs| pairs.into_iter().unzip())
}

/// Fits a forest on a seeded split of `rows` and scores it on the held-out side.
///
/// Every row must carry a `Logic Depth` label.
pub fn train(
    rows: &[FeatureRow],
    params: ForestParams,
    options: &TrainOptions,
) -> Result<(TrainedDepthModel, EvaluationReport), ModelError> {
    let (samples, targets) = labeled(rows)?;
    if samples.len() < 2 {
        return Err(ModelError::EmptyDataset {
            rows: samples.len(),
        });
    }

    let (train_idx, test_idx) = train_test_split(samples.len(), options);
    let pick = |idx: &[usize]| -> (Vec<Sample>, Vec<f64>) {
        idx.iter().map(|&i| (samples[i], targets[i])).unzip()
    };
    let (train_x, train_y) = pick(&train_idx);
    let (test_x, test_y) = pick(&test_idx);

    info!(
        "Training {} trees on {} rows, holding out {}",
        params.n_trees,
        train_x.len(),
        test_x.len()
    );
    let mut forest = RandomForest::new(params);
    forest.fit(&train_x, &train_y)?;

    let estimate = forest.predict_all(&test_x);
    let report = EvaluationReport {
        train_rows: train_x.len(),
        test_rows: test_x.len(),
        mae: mean_absolute_error(&test_y, &estimate).unwrap_or_default(),
        mse: mean_squared_error(&test_y, &estimate).unwrap_or_default(),
        r2: r2_score(&test_y, &estimate).unwrap_or_default(),
    };
    info!("Model MAE: {}", report.mae);

    Ok((TrainedDepthModel::new(forest), report))
}
