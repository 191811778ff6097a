//! Flat tabular datasets derived from netlists.
//!
//! Feature rows carry the cheap structural features of every cell together
//! with a depth label whose origin (`proxy` or `extracted`) travels with it.
//! Result rows pair the exact graph-search depth with a model estimate.

mod error;
mod extract;
mod row;
mod table;

pub use error::DatasetError;
pub use extract::extract_features;
pub use row::{DepthSource, FeatureRow, Features, ResultRow};
pub use table::{
    FEATURE_COLUMNS, LABEL_COLUMN, RESULT_COLUMNS, read_feature_rows, read_result_rows,
    write_feature_rows, write_result_rows,
};
