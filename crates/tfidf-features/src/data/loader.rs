use std::{
    fs::File,
    path::{Path, PathBuf},
};

use tracing::{debug, error};

use crate::error::{FeatureError, Result};

/// Cell values treated as absent; each is replaced by an empty string on load.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn normalize_cell(value: &str) -> String {
    if MISSING_MARKERS.contains(&value) {
        String::new()
    } else {
        value.to_owned()
    }
}

/// A CSV file held in memory: header names plus rows of string cells.
///
/// Every row has exactly one cell per header; short rows are padded with `""`.
#[derive(Debug, Clone)]
pub struct RecordTable {
    source: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordTable {
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// All values of column `name`, in row order.
    ///
    /// # Errors
    /// [`FeatureError::MissingColumn`] if no header is named `name`.
    pub fn column(&self, name: &str) -> Result<Vec<String>> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                error!(path = %self.source.display(), column = name, "Column not found");
                FeatureError::MissingColumn {
                    path: self.source.clone(),
                    column: name.to_owned(),
                }
            })?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }
}

/// Load a CSV file with a header row, normalizing absent values to `""`.
///
/// # Errors
/// [`FeatureError::Io`] if the file cannot be opened, [`FeatureError::InputParse`]
/// on malformed CSV or invalid UTF-8, [`FeatureError::MalformedRow`] when a row has
/// more fields than the header.
pub fn load_data(path: impl AsRef<Path>) -> Result<RecordTable> {
    let path = path.as_ref();
    let parse_error = |source: csv::Error| {
        error!(path = %path.display(), "Failed to parse the csv file: {source}");
        FeatureError::InputParse {
            path: path.to_path_buf(),
            source,
        }
    };

    let file = File::open(path).map_err(|source| {
        error!(path = %path.display(), "Failed to open the csv file: {source}");
        FeatureError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, csv::Position::line);
            error!(path = %path.display(), line, "Row has more fields than the header");
            return Err(FeatureError::MalformedRow {
                path: path.to_path_buf(),
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut row = record.iter().map(normalize_cell).collect::<Vec<_>>();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    debug!(path = %path.display(), num_rows = rows.len(), "Data loaded and missing values filled");
    Ok(RecordTable {
        source: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Ordered text/label records taken from one split of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    texts: Vec<String>,
    labels: Vec<String>,
}

impl Corpus {
    pub fn new<T, L>(records: impl IntoIterator<Item = (T, L)>) -> Self
    where
        T: Into<String>,
        L: Into<String>,
    {
        let (texts, labels) = records
            .into_iter()
            .map(|(text, label)| (text.into(), label.into()))
            .unzip();
        Self { texts, labels }
    }

    /// Selects the text and label columns of a loaded table.
    ///
    /// # Errors
    /// [`FeatureError::MissingColumn`] if either column is absent.
    pub fn from_table(table: &RecordTable, text_column: &str, target_column: &str) -> Result<Self> {
        Ok(Self {
            texts: table.column(text_column)?,
            labels: table.column(target_column)?,
        })
    }

    #[must_use]
    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_keeps_row_order() {
        let f = write_csv("text,target\nfirst doc,1\nsecond doc,0\nthird,1\n");
        let table = load_data(f.path()).unwrap();
        assert_eq!(table.headers(), &["text", "target"]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.column("text").unwrap(),
            vec!["first doc", "second doc", "third"]
        );
    }

    #[test]
    fn test_absent_values_become_empty_strings() {
        let f = write_csv("text,target\n,1\nNaN,0\nhello\n\"quoted, text\",null\n");
        let corpus = Corpus::from_table(&load_data(f.path()).unwrap(), "text", "target").unwrap();
        assert_eq!(corpus.texts(), &["", "", "hello", "quoted, text"]);
        assert_eq!(corpus.labels(), &["1", "0", "", ""]);
    }

    #[test]
    fn test_missing_column() {
        let f = write_csv("body,target\nx,1\n");
        let table = load_data(f.path()).unwrap();
        let err = Corpus::from_table(&table, "text", "target").unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn { column, .. } if column == "text"));
    }

    #[test]
    fn test_extra_fields_are_rejected() {
        let f = write_csv("text,target\nok,1\ntoo,many,fields\n");
        let err = load_data(f.path()).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::MalformedRow {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_a_parse_error() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"text,target\n\xff\xfe,1\n").unwrap();
        assert!(matches!(
            load_data(f.path()),
            Err(FeatureError::InputParse { .. })
        ));
    }

    #[test]
    fn test_unreadable_file() {
        assert!(matches!(
            load_data("/nonexistent/train.csv"),
            Err(FeatureError::Io { .. })
        ));
    }

    #[test]
    fn test_corpus_from_pairs() {
        let corpus = Corpus::new([("cat dog", "pos"), ("dog dog", "neg")]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.labels(), &["pos", "neg"]);
    }
}
