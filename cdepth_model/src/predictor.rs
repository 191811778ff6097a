use std::path::Path;

use cdepth_dataset::{FeatureRow, Features};

use crate::{EvaluationReport, ForestParams, ModelError, TrainOptions, TrainedDepthModel, train};

/// Holds at most one model and answers depth queries with it.
#[derive(Debug, Clone, Default)]
pub struct DepthPredictor {
    model: Option<TrainedDepthModel>,
}

impl DepthPredictor {
    /// A predictor with no model yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already trained model.
    #[must_use]
    pub const fn from_model(model: TrainedDepthModel) -> Self {
        Self { model: Some(model) }
    }

    /// Loads a model artifact.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        TrainedDepthModel::load(path).map(Self::from_model)
    }

    /// Returns true once a model is trained or loaded.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// The loaded or trained model, if any.
    #[must_use]
    pub const fn model(&self) -> Option<&TrainedDepthModel> {
        self.model.as_ref()
    }

    /// Trains a new model on `rows`, replacing the current one.
    pub fn train(
        &mut self,
        rows: &[FeatureRow],
        params: ForestParams,
        options: &TrainOptions,
    ) -> Result<EvaluationReport, ModelError> {
        let (model, report) = train(rows, params, options)?;
        self.model = Some(model);
        Ok(report)
    }

    /// Estimated depth for `features`.
    pub fn predict(&self, features: Features) -> Result<f64, ModelError> {
        self.model
            .as_ref()
            .map(|model| model.predict(features))
            .ok_or(ModelError::MissingModel { path: None })
    }

    /// Persists the current model.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        self.model
            .as_ref()
            .ok_or(ModelError::MissingModel { path: None })?
            .save(path)
    }
}
