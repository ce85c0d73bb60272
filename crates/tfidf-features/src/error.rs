use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeatureError>;

/// Everything that can stop a feature engineering run.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("parameter file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("failed to parse parameter file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse csv file {}: {source}", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error(
        "malformed row in {}: line {line} has {found} fields, expected at most {expected}",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("column `{column}` not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `max_features` must be a positive integer.
    #[error("max_features must be a positive integer, got {0}")]
    InvalidMaxFeatures(i64),

    #[error("invalid vectorizer parameters: {0}")]
    InvalidParams(String),

    #[error("training corpus is empty")]
    EmptyCorpus,

    /// Training texts produced no terms that survived tokenization and filtering.
    #[error("empty vocabulary: training texts contain no usable terms")]
    EmptyVocabulary,

    #[error("feature matrix has {rows} rows but {labels} labels were supplied")]
    SchemaMismatch { rows: usize, labels: usize },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeatureError {
    /// True for the errors caused by a bad tunable or an unusable training corpus.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidMaxFeatures(_)
                | Self::InvalidParams(_)
                | Self::EmptyCorpus
                | Self::EmptyVocabulary
        )
    }
}
