//! Feature tables: a dense TF-IDF matrix with its label column appended.

use ndarray::{Array2, ArrayView1};

use crate::error::{FeatureError, Result};

/// Name of the trailing label column in every feature table.
pub const LABEL_COLUMN: &str = "label";

/// One corpus worth of features, ready to be written out.
///
/// Columns are `"0"` through `"V-1"` (one per vocabulary term, in vocabulary
/// order) followed by [`LABEL_COLUMN`]. Row `i` belongs to input record `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    features: Array2<f64>,
    labels: Vec<String>,
}

impl FeatureTable {
    /// Appends `labels` to `features` as the last column.
    ///
    /// # Errors
    /// [`FeatureError::SchemaMismatch`] when the label count differs from the row count.
    pub fn assemble(features: Array2<f64>, labels: Vec<String>) -> Result<Self> {
        if features.nrows() != labels.len() {
            return Err(FeatureError::SchemaMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        Ok(Self { features, labels })
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Header names, label last.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        (0..self.num_features())
            .map(|idx| idx.to_string())
            .chain(std::iter::once(LABEL_COLUMN.to_string()))
            .collect()
    }

    #[must_use]
    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Rows as `(feature weights, label)` pairs in input order.
    pub fn rows(&self) -> impl Iterator<Item = (ArrayView1<'_, f64>, &str)> {
        self.features
            .rows()
            .into_iter()
            .zip(self.labels.iter().map(String::as_str))
    }
}
