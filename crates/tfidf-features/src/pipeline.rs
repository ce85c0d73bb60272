use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::{
    config::load_params,
    data::{Corpus, encode_csv, load_data, write_bytes},
    error::{FeatureError, Result},
    pre_processor::{TfidfVectorizer, VectorizerParams, to_dense},
    table::FeatureTable,
};

/// Fixed locations used by the feature engineering stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelinePaths {
    pub params: PathBuf,
    pub train_input: PathBuf,
    pub test_input: PathBuf,
    pub train_output: PathBuf,
    pub test_output: PathBuf,
    pub log_file: PathBuf,
}

impl PipelinePaths {
    /// The standard layout below `root`.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            params: root.join("params.yaml"),
            train_input: root.join("data").join("interim").join("train_preprocessed.csv"),
            test_input: root.join("data").join("interim").join("test_preprocessed.csv"),
            train_output: root.join("data").join("processed").join("train_tfidf.csv"),
            test_output: root.join("data").join("processed").join("test_tfidf.csv"),
            log_file: root.join("logs").join("feature_engineering.log"),
        }
    }
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self::rooted("")
    }
}

/// Train and test tables sharing the vocabulary of `vectorizer`.
#[derive(Debug, Clone)]
pub struct FeatureTables {
    pub vectorizer: TfidfVectorizer,
    pub train: FeatureTable,
    pub test: FeatureTable,
}

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub vocab_size: usize,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Fits TF-IDF on the training texts and applies it to both corpora.
///
/// The vocabulary and IDF factors come from `train` alone; `test` is only transformed.
///
/// # Errors
/// [`FeatureError::EmptyCorpus`] or [`FeatureError::EmptyVocabulary`] for an unusable
/// training corpus, [`FeatureError::SchemaMismatch`] if a corpus is internally inconsistent.
pub fn apply_tfidf(
    train: &Corpus,
    test: &Corpus,
    params: VectorizerParams,
) -> Result<FeatureTables> {
    vectorize_corpora(train, test, params).inspect_err(|e| {
        error!(
            train_rows = train.len(),
            test_rows = test.len(),
            "Error occurred during tf-idf vectorization of text feature: {e}"
        );
    })
}

fn vectorize_corpora(
    train: &Corpus,
    test: &Corpus,
    params: VectorizerParams,
) -> Result<FeatureTables> {
    if train.is_empty() {
        return Err(FeatureError::EmptyCorpus);
    }
    let (vectorizer, train_matrix) = TfidfVectorizer::fit_transform(train.texts(), params)?;
    let test_matrix = vectorizer.transform(test.texts());

    let train_table = FeatureTable::assemble(to_dense(&train_matrix), train.labels().to_vec())?;
    let test_table = FeatureTable::assemble(to_dense(&test_matrix), test.labels().to_vec())?;
    debug!(
        vocab_size = vectorizer.num_features(),
        "tf-idf vectorization performed on both train and test data"
    );
    Ok(FeatureTables {
        vectorizer,
        train: train_table,
        test: test_table,
    })
}

fn encode_for(table: &FeatureTable, path: &Path) -> Result<Vec<u8>> {
    encode_csv(table).map_err(|source| {
        error!(path = %path.display(), "Failed to encode feature table: {source}");
        FeatureError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Runs the whole stage: parameters, both inputs, vectorization, both outputs.
///
/// Nothing is written unless both tables were built and encoded.
///
/// # Errors
/// The first [`FeatureError`] raised by any step.
pub fn run(paths: &PipelinePaths) -> Result<RunSummary> {
    let params = load_params(&paths.params)?;
    let fe = params.feature_engineering;
    let vectorizer_params = fe.vectorizer_params()?;

    let train = Corpus::from_table(
        &load_data(&paths.train_input)?,
        &fe.text_column,
        &fe.target_column,
    )?;
    let test = Corpus::from_table(
        &load_data(&paths.test_input)?,
        &fe.text_column,
        &fe.target_column,
    )?;

    let tables = apply_tfidf(&train, &test, vectorizer_params)?;

    let train_bytes = encode_for(&tables.train, &paths.train_output)?;
    let test_bytes = encode_for(&tables.test, &paths.test_output)?;
    write_bytes(&train_bytes, &paths.train_output)?;
    write_bytes(&test_bytes, &paths.test_output)?;

    let summary = RunSummary {
        vocab_size: tables.vectorizer.num_features(),
        train_rows: tables.train.num_rows(),
        test_rows: tables.test.num_rows(),
    };
    info!(
        vocab_size = summary.vocab_size,
        train_rows = summary.train_rows,
        test_rows = summary.test_rows,
        "Feature engineering complete"
    );
    Ok(summary)
}
