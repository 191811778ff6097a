//! Learned depth estimates from structural cell features.
//!
//! A bagged ensemble of regression trees maps `(fan-in, fan-out, gate count)`
//! to a depth value. Models are trained from feature datasets, evaluated on a
//! seeded held-out split, and persisted as JSON documents.

mod error;
mod forest;
mod metrics;
mod persist;
mod predictor;
mod split;
mod train;
mod tree;

pub use error::ModelError;
pub use forest::{ForestParams, RandomForest};
pub use metrics::{mean_absolute_error, mean_squared_error, r2_score};
pub use persist::{MODEL_FORMAT_VERSION, TrainedDepthModel};
pub use predictor::DepthPredictor;
pub use split::{TrainOptions, train_test_split};
pub use train::{EvaluationReport, train};
pub use tree::RegressionTree;

use cdepth_dataset::Features;

/// One model input in feature column order.
pub type Sample = [f64; Features::LEN];

/// A regressor that learns depth from feature vectors.
pub trait DepthRegressor {
    /// Fits the model to `samples` and their `targets`, replacing any previous fit.
    fn fit(&mut self, samples: &[Sample], targets: &[f64]) -> Result<(), ModelError>;

    /// Estimates the depth of one sample.
    fn predict(&self, sample: &Sample) -> f64;

    /// Estimates the depth of each sample.
    fn predict_all(&self, samples: &[Sample]) -> Vec<f64> {
        samples.iter().map(|sample| self.predict(sample)).collect()
    }
}
