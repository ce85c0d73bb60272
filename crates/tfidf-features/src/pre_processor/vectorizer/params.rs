use std::ops::RangeInclusive;

use crate::error::{FeatureError, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct VectorizerParams {
    /// Upper bound on the vocabulary size.
    max_features: usize,
    /// Word n-gram sizes, e.g. `[1]` for single words or `[1, 2]` for words and word pairs.
    ngram_range: Vec<usize>,
    /// Minimum document frequency for filtering vocabulary.
    /// - If `min_df` is in (0.0, 1.0), it's a proportion of documents
    /// - If `min_df` >= 1.0, it's an absolute document count
    min_df: f64,
    /// Maximum document frequency for filtering vocabulary.
    /// - If `max_df` is in (0.0, 1.0], it's a proportion of documents
    /// - If `max_df` > 1.0, it's an absolute document count
    max_df: f64,
    /// Apply sublinear tf scaling: replace term frequency `tf` with `1 + log(tf)`.
    /// This reduces the impact of terms that occur many times in a document.
    sublinear_tf: bool,
}

impl VectorizerParams {
    /// Validates and builds the parameter set.
    ///
    /// `max_features` is taken as a signed integer so that zero and negative
    /// values coming from a parameter file are reported rather than wrapped.
    pub fn new(
        max_features: i64,
        ngram_range: impl Into<RangeInclusive<usize>>,
        min_df: f64,
        max_df: f64,
        sublinear_tf: bool,
    ) -> Result<Self> {
        let max_features = usize::try_from(max_features)
            .ok()
            .filter(|&k| k > 0)
            .ok_or(FeatureError::InvalidMaxFeatures(max_features))?;

        let n_sizes = ngram_range.into().collect::<Vec<_>>();
        if n_sizes.is_empty() {
            return Err(FeatureError::InvalidParams(
                "ngram_range must contain at least one value".to_string(),
            ));
        }
        if n_sizes[0] == 0 {
            return Err(FeatureError::InvalidParams(
                "ngram_range must start at 1 or above".to_string(),
            ));
        }
        if min_df.is_nan() || min_df <= 0.0 {
            return Err(FeatureError::InvalidParams(format!(
                "min_df must be positive (proportion in (0.0, 1.0) or absolute count >= 1.0), got {min_df}"
            )));
        }
        if max_df.is_nan() || max_df <= 0.0 {
            return Err(FeatureError::InvalidParams(format!(
                "max_df must be positive (proportion in (0.0, 1.0] or absolute count > 1.0), got {max_df}"
            )));
        }

        Ok(Self {
            max_features,
            ngram_range: n_sizes,
            min_df,
            max_df,
            sublinear_tf,
        })
    }

    /// Unigram parameters with no document-frequency filtering.
    pub fn with_max_features(max_features: i64) -> Result<Self> {
        Self::new(max_features, 1..=1, 1.0, 1.0, false)
    }

    #[must_use]
    pub fn max_features(&self) -> usize {
        self.max_features
    }

    #[must_use]
    pub fn ngram_counts(&self) -> &[usize] {
        &self.ngram_range
    }

    #[must_use]
    pub fn min_df(&self) -> f64 {
        self.min_df
    }

    #[must_use]
    pub fn max_df(&self) -> f64 {
        self.max_df
    }

    #[must_use]
    pub fn sublinear_tf(&self) -> bool {
        self.sublinear_tf
    }

    /// Smallest document count a term needs to be kept, given `n_docs` training documents.
    #[must_use]
    pub fn min_doc_count(&self, n_docs: usize) -> f64 {
        if self.min_df < 1.0 {
            self.min_df * n_docs as f64
        } else {
            self.min_df
        }
    }

    /// Largest document count a term may have to be kept, given `n_docs` training documents.
    #[must_use]
    pub fn max_doc_count(&self, n_docs: usize) -> f64 {
        if self.max_df <= 1.0 {
            self.max_df * n_docs as f64
        } else {
            self.max_df
        }
    }
}
