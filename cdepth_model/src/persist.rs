//! On-disk model documents.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use cdepth_dataset::{FEATURE_COLUMNS, Features};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{DepthRegressor, ModelError, RandomForest};

/// Version written into every model document.
pub const MODEL_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct DocumentRef<'a> {
    format_version: u32,
    features: Vec<&'static str>,
    forest: &'a RandomForest,
}

#[derive(Deserialize)]
struct Document {
    format_version: u32,
    forest: RandomForest,
}

/// A fitted forest, ready for inference and persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedDepthModel {
    forest: RandomForest,
}

impl TrainedDepthModel {
    pub(crate) const fn new(forest: RandomForest) -> Self {
        Self { forest }
    }

    /// The fitted ensemble.
    #[must_use]
    pub const fn forest(&self) -> &RandomForest {
        &self.forest
    }

    /// Estimated depth for one feature vector.
    #[must_use]
    pub fn predict(&self, features: Features) -> f64 {
        self.forest.predict(&features.to_array())
    }

    /// Writes the model as a JSON document.
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let file = File::create(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = DocumentRef {
            format_version: MODEL_FORMAT_VERSION,
            features: FEATURE_COLUMNS[2..].to_vec(),
            forest: &self.forest,
        };
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &document).map_err(|source| ModelError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.flush().map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Model saved to {}", path.display());
        Ok(())
    }

    /// Reads a model document written by [`Self::save`].
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::MissingModel {
                path: Some(path.to_path_buf()),
            });
        }
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Document =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if document.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedFormat {
                path: path.to_path_buf(),
                found: document.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }
        if !document.forest.is_fitted() {
            return Err(ModelError::MissingModel {
                path: Some(path.to_path_buf()),
            });
        }
        Ok(Self::new(document.forest))
    }
}
