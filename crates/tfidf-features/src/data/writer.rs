use std::{fs, io, path::Path};

use tracing::{debug, error};

use crate::{
    error::{FeatureError, Result},
    table::FeatureTable,
};

/// Shortest decimal that round-trips, always with a fractional part (`0.0`, `0.25`).
fn format_weight(value: f64) -> String {
    format!("{value:?}")
}

/// Serializes `table` as CSV with a header row.
///
/// # Errors
/// Only if the in-memory CSV writer fails.
pub fn encode_csv(table: &FeatureTable) -> io::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for (weights, label) in table.rows() {
        writer.write_record(
            weights
                .iter()
                .map(|&w| format_weight(w))
                .chain(std::iter::once(label.to_owned())),
        )?;
    }
    writer.into_inner().map_err(csv::IntoInnerError::into_error)
}

/// Writes already-encoded bytes to `path`, creating parent directories.
///
/// # Errors
/// [`FeatureError::Write`] if a directory or the file cannot be created.
pub fn write_bytes(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source: io::Error| {
        error!(path = %path.display(), "Unexpected error occurred while saving the data: {source}");
        FeatureError::Write {
            path: path.to_path_buf(),
            source,
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, bytes).map_err(write_error)?;
    debug!(path = %path.display(), "Data saved");
    Ok(())
}

/// Saves a feature table as CSV, creating parent directories as needed.
///
/// # Errors
/// [`FeatureError::Write`] on any failure.
pub fn save_data(table: &FeatureTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_csv(table).map_err(|source| FeatureError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_bytes(&bytes, path)
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use tempfile::TempDir;

    use super::*;

    fn sample_table() -> FeatureTable {
        FeatureTable::assemble(
            array![[0.6, 0.8], [0.0, 1.0]],
            vec!["pos".into(), "neg, maybe".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let bytes = encode_csv(&sample_table()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "0,1,label\n0.6,0.8,pos\n0.0,1.0,\"neg, maybe\"\n");
    }

    #[test]
    fn test_weights_round_trip() {
        let w = 0.707_106_781_186_547_5_f64;
        assert_eq!(format_weight(w).parse::<f64>().unwrap(), w);
        assert_eq!(format_weight(0.0), "0.0");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("processed").join("train_tfidf.csv");
        save_data(&sample_table(), &path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("0,1,label\n"));
        assert_eq!(written.lines().count(), 3);
    }

    #[test]
    fn test_write_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file, not a directory").unwrap();
        let err = save_data(&sample_table(), blocker.join("out.csv")).unwrap_err();
        assert!(matches!(err, FeatureError::Write { .. }));
    }
}
