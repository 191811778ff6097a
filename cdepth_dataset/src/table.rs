//! CSV encoding of feature and result datasets.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::{DatasetError, FeatureRow, ResultRow};

/// Columns every feature dataset must carry.
pub const FEATURE_COLUMNS: [&str; 5] = ["File", "Signal", "Fan-in", "Fan-out", "Gate Count"];

/// Column carrying the depth label.
pub const LABEL_COLUMN: &str = "Logic Depth";

const FEATURE_HEADER: [&str; 7] = [
    "File",
    "Signal",
    "Fan-in",
    "Fan-out",
    "Gate Count",
    LABEL_COLUMN,
    "Depth Source",
];

/// Columns every result dataset carries.
pub const RESULT_COLUMNS: [&str; 4] = ["RTL File", "Signal", "Extracted Depth", "Predicted Depth"];

fn open_reader(path: &Path) -> Result<csv::Reader<File>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

fn check_columns(
    reader: &mut csv::Reader<File>,
    path: &Path,
    required: &[&str],
) -> Result<(), DatasetError> {
    let headers = reader.headers().map_err(|source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let missing: Vec<String> = required
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::Schema {
            path: path.to_path_buf(),
            missing,
        })
    }
}

fn read_rows<T: DeserializeOwned>(path: &Path, required: &[&str]) -> Result<Vec<T>, DatasetError> {
    let mut reader = open_reader(path)?;
    check_columns(&mut reader, path, required)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| DatasetError::Csv {
            path: path.to_path_buf(),
            source,
        })
}

fn write_rows<T: Serialize>(
    path: &Path,
    header: &[&str],
    rows: &[T],
) -> Result<(), DatasetError> {
    let csv_err = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    // Serialized rows emit their own header; an empty table still gets one.
    if rows.is_empty() {
        writer.write_record(header).map_err(csv_err)?;
    }
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {} row(s) to {}", rows.len(), path.display());
    Ok(())
}

/// Reads a feature dataset. With `require_label`, the `Logic Depth` column must exist too.
pub fn read_feature_rows(path: &Path, require_label: bool) -> Result<Vec<FeatureRow>, DatasetError> {
    let mut required = FEATURE_COLUMNS.to_vec();
    if require_label {
        required.push(LABEL_COLUMN);
    }
    read_rows(path, &required)
}

/// Writes a feature dataset, header included.
pub fn write_feature_rows(path: &Path, rows: &[FeatureRow]) -> Result<(), DatasetError> {
    write_rows(path, &FEATURE_HEADER, rows)
}

/// Reads a result dataset.
pub fn read_result_rows(path: &Path) -> Result<Vec<ResultRow>, DatasetError> {
    read_rows(path, &RESULT_COLUMNS)
}

/// Writes a result dataset, header included.
pub fn write_result_rows(path: &Path, rows: &[ResultRow]) -> Result<(), DatasetError> {
    write_rows(path, &RESULT_COLUMNS, rows)
}
