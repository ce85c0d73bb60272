use ndarray::Array2;
use sprs::CsMat;
use tracing::debug;

use super::{count_vectorizer::CountVectorizer, params::VectorizerParams, vocabulary::Vocabulary};
use crate::error::Result;

/// A fitted TF-IDF model: the training vocabulary plus its IDF factors.
///
/// Only [`TfidfVectorizer::fit`] creates one, and nothing mutates it afterwards,
/// so transforming a test corpus can never change what was learned from training.
#[derive(Clone, Debug)]
pub struct TfidfVectorizer {
    count_vectorizer: CountVectorizer,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit<T: AsRef<str>>(texts: &[T], count_vectorizer_params: VectorizerParams) -> Result<Self> {
        debug!(num_texts = texts.len(), "Fitting TfidfVectorizer");
        let (count_vectorizer, tf_matrix) =
            CountVectorizer::fit_transform(texts, count_vectorizer_params)?;
        Ok(Self::from_counts(count_vectorizer, &tf_matrix))
    }

    fn from_counts(count_vectorizer: CountVectorizer, tf_matrix: &CsMat<f64>) -> Self {
        debug!("Calculating IDF values");

        // Calculate IDF: log((n_docs + 1) / (df + 1)) + 1
        let n_docs = tf_matrix.rows() as f64;
        let num_features = count_vectorizer.num_features();

        // Count document frequency for each term
        let mut df = vec![0usize; num_features];

        for row_vec in tf_matrix.outer_iterator() {
            for (col_idx, _val) in row_vec.iter() {
                df[col_idx] += 1;
            }
        }
        let idf = df
            .iter()
            .map(|&doc_freq| ((n_docs + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0)
            .collect();
        debug!("IDF calculation complete");

        Self {
            count_vectorizer,
            idf,
        }
    }

    /// Weights `texts` against the fitted vocabulary; rows are L2-normalized.
    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> CsMat<f64> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using TfidfVectorizer"
        );
        let mut tf_matrix = self.count_vectorizer.transform(texts);
        self.apply_idf(&mut tf_matrix);
        tf_matrix
    }

    fn apply_idf(&self, tf_matrix: &mut CsMat<f64>) {
        let sublinear_tf = self.count_vectorizer.params().sublinear_tf();

        for mut row_vec in tf_matrix.outer_iterator_mut() {
            for (col_idx, val) in row_vec.iter_mut() {
                if sublinear_tf {
                    *val = 1.0 + val.ln();
                }
                *val *= self.idf[col_idx];
            }
            // Rows with no known terms stay all-zero
            let norm = row_vec.iter().map(|(_, &v)| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, val) in row_vec.iter_mut() {
                    *val /= norm;
                }
            }
        }
    }

    /// Dense counterpart of [`TfidfVectorizer::transform`]: one row per text, one column per term.
    pub fn transform_dense<T: AsRef<str>>(&self, texts: &[T]) -> Array2<f64> {
        to_dense(&self.transform(texts))
    }

    /// Fits on `texts` and weights the same texts without tokenizing them twice.
    pub fn fit_transform<T: AsRef<str>>(
        texts: &[T],
        count_vectorizer_params: VectorizerParams,
    ) -> Result<(Self, CsMat<f64>)> {
        let (count_vectorizer, mut tf_matrix) =
            CountVectorizer::fit_transform(texts, count_vectorizer_params)?;
        let vectorizer = Self::from_counts(count_vectorizer, &tf_matrix);
        vectorizer.apply_idf(&mut tf_matrix);
        Ok((vectorizer, tf_matrix))
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.count_vectorizer.num_features()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        self.count_vectorizer.vocabulary()
    }

    /// IDF factor per column, in vocabulary order.
    #[must_use]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[must_use]
    pub fn params(&self) -> &VectorizerParams {
        self.count_vectorizer.params()
    }
}

/// Expands a CSR matrix into a dense one; missing entries become `0.0`.
#[must_use]
pub fn to_dense(matrix: &CsMat<f64>) -> Array2<f64> {
    let mut dense = Array2::zeros(matrix.shape());
    for (row_idx, row_vec) in matrix.outer_iterator().enumerate() {
        for (col_idx, &val) in row_vec.iter() {
            dense[[row_idx, col_idx]] = val;
        }
    }
    dense
}
