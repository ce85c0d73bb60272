//! YAML parameter file loading.
//!
//! The parameter file is shared by every stage of the pipeline; only the
//! `feature_engineering` section is read here and other sections are ignored.

use std::{io::ErrorKind, path::Path};

use serde::Deserialize;
use tracing::{debug, error};

use crate::{
    error::{FeatureError, Result},
    pre_processor::VectorizerParams,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    pub feature_engineering: FeatureEngineeringParams,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureEngineeringParams {
    /// Signed so that zero and negative values reach validation instead of failing to parse.
    pub max_features: i64,
    #[serde(default = "default_text_column")]
    pub text_column: String,
    #[serde(default = "default_target_column")]
    pub target_column: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default = "default_df")]
    pub min_df: f64,
    #[serde(default = "default_df")]
    pub max_df: f64,
    #[serde(default)]
    pub sublinear_tf: bool,
}

fn default_text_column() -> String {
    "text".to_string()
}

fn default_target_column() -> String {
    "target".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_df() -> f64 {
    1.0
}

impl FeatureEngineeringParams {
    /// Validates the tunables and turns them into vectorizer parameters.
    pub fn vectorizer_params(&self) -> Result<VectorizerParams> {
        VectorizerParams::new(
            self.max_features,
            self.ngram_range.0..=self.ngram_range.1,
            self.min_df,
            self.max_df,
            self.sublinear_tf,
        )
        .inspect_err(|e| {
            error!(
                max_features = self.max_features,
                "Invalid feature engineering parameters: {e}"
            );
        })
    }
}

/// Load parameters from a YAML file.
///
/// # Errors
/// [`FeatureError::ConfigNotFound`] if `path` does not exist, [`FeatureError::Io`]
/// if it cannot be read, [`FeatureError::ConfigParse`] if the YAML is malformed
/// or lacks `feature_engineering.max_features`.
pub fn load_params(path: impl AsRef<Path>) -> Result<Params> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            error!(path = %path.display(), "File not found");
            FeatureError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            error!(path = %path.display(), "Failed to read parameter file: {source}");
            FeatureError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let params: Params = serde_yaml::from_str(&contents).map_err(|source| {
        error!(path = %path.display(), "YAML error: {source}");
        FeatureError::ConfigParse {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), "Parameters retrieved");
    Ok(params)
}
