use ahash::AHashMap as HashMap;
use sprs::CsMat;
use tracing::debug;

use super::{
    ngrams::{self, TermStats},
    params::VectorizerParams,
    tokenizer,
    vocabulary::Vocabulary,
};
use crate::error::{FeatureError, Result};

#[derive(Clone, Debug)]
pub struct CountVectorizer {
    params: VectorizerParams,
    vocab: Vocabulary,
}

impl CountVectorizer {
    fn count_documents(
        tokenized_texts: &[Vec<String>],
        params: &VectorizerParams,
    ) -> Vec<HashMap<String, usize>> {
        tokenized_texts
            .iter()
            .map(|tokens| ngrams::count_ngrams(tokens, params.ngram_counts()))
            .collect()
    }

    /// Builds the vocabulary from per-document term counts.
    ///
    /// Terms outside the document-frequency bounds are dropped first, then the
    /// `max_features` most frequent terms (by total count, ties by term) are kept.
    fn fit_from_ngrams(
        ngram_maps: &[HashMap<String, usize>],
        params: VectorizerParams,
    ) -> Result<Self> {
        let n_docs = ngram_maps.len();
        if n_docs == 0 {
            return Err(FeatureError::EmptyCorpus);
        }

        let min_count = params.min_doc_count(n_docs);
        let max_count = params.max_doc_count(n_docs);
        if max_count < min_count {
            return Err(FeatureError::InvalidParams(format!(
                "max_df corresponds to {max_count} documents, fewer than min_df's {min_count}"
            )));
        }

        let term_stats = ngrams::build_term_stats(ngram_maps);
        let vocab_size = term_stats.len();

        debug!(
            min_df = params.min_df(),
            max_df = params.max_df(),
            "Applying document frequency filtering"
        );
        let mut candidates = term_stats
            .into_iter()
            .filter(|(_, stats)| {
                let df = stats.doc_freq as f64;
                df >= min_count && df <= max_count
            })
            .collect::<Vec<(String, TermStats)>>();
        debug!(
            original_size = vocab_size,
            filtered_size = candidates.len(),
            "Vocabulary filtered by document frequency"
        );

        if candidates.len() > params.max_features() {
            candidates.sort_unstable_by(|(term_a, a), (term_b, b)| {
                b.total_freq
                    .cmp(&a.total_freq)
                    .then_with(|| term_a.cmp(term_b))
            });
            candidates.truncate(params.max_features());
            debug!(
                max_features = params.max_features(),
                "Vocabulary truncated to most frequent terms"
            );
        }

        let vocab = Vocabulary::from_terms(candidates.into_iter().map(|(term, _)| term).collect());
        if vocab.is_empty() {
            return Err(FeatureError::EmptyVocabulary);
        }

        debug!(vocab_size = vocab.len(), "CountVectorizer fitting complete");
        Ok(Self { params, vocab })
    }

    pub fn transform<T: AsRef<str>>(&self, texts: &[T]) -> CsMat<f64> {
        debug!(
            num_texts = texts.len(),
            "Transforming texts using CountVectorizer"
        );
        let tokenized_texts = tokenizer::tokenize(texts);
        let ngram_maps = Self::count_documents(&tokenized_texts, &self.params);
        self.transform_from_ngrams(&ngram_maps)
    }

    /// Builds the CSR count matrix; terms outside the vocabulary are skipped.
    fn transform_from_ngrams(&self, ngram_maps: &[HashMap<String, usize>]) -> CsMat<f64> {
        let num_texts = ngram_maps.len();
        let mut indptr = Vec::with_capacity(num_texts + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();

        indptr.push(0);

        for ngrams in ngram_maps {
            let mut row_entries = ngrams
                .iter()
                .filter_map(|(term, &count)| {
                    self.vocab
                        .get(term)
                        .map(|col_idx| (col_idx, count as f64))
                })
                .collect::<Vec<_>>();

            row_entries.sort_unstable_by_key(|(col_idx, _)| *col_idx);
            for (col_idx, count) in row_entries {
                indices.push(col_idx);
                data.push(count);
            }
            indptr.push(indices.len());
        }

        debug!(
            non_zero_entries = data.len(),
            "Text transformation complete"
        );
        CsMat::new((num_texts, self.num_features()), indptr, indices, data)
    }

    /// Fits and transforms the training texts, counting n-grams only once.
    pub fn fit_transform<T: AsRef<str>>(
        texts: &[T],
        params: VectorizerParams,
    ) -> Result<(Self, CsMat<f64>)> {
        debug!(
            num_texts = texts.len(),
            "fit_transform: tokenizing and counting n-grams once"
        );
        let tokenized_texts = tokenizer::tokenize(texts);
        let ngram_maps = Self::count_documents(&tokenized_texts, &params);

        let vectorizer = Self::fit_from_ngrams(&ngram_maps, params)?;
        let transformed = vectorizer.transform_from_ngrams(&ngram_maps);
        Ok((vectorizer, transformed))
    }

    #[must_use]
    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    #[must_use]
    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_features: i64) -> VectorizerParams {
        VectorizerParams::with_max_features(max_features).unwrap()
    }

    impl CountVectorizer {
        fn fit<T: AsRef<str>>(texts: &[T], params: VectorizerParams) -> Result<Self> {
            Self::fit_transform(texts, params).map(|(cv, _)| cv)
        }
    }

    #[test]
    fn test_vocabulary_is_lexically_indexed() {
        let cv = CountVectorizer::fit(&["dog cat", "bird dog"], params(10)).unwrap();
        let vocab = cv.vocabulary();
        assert_eq!(vocab.terms().collect::<Vec<_>>(), vec!["bird", "cat", "dog"]);
        assert_eq!(cv.num_features(), 3);
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let texts = ["apple apple apple", "banana banana", "cherry", "apple banana"];
        let cv = CountVectorizer::fit(&texts, params(2)).unwrap();
        assert_eq!(
            cv.vocabulary().terms().collect::<Vec<_>>(),
            vec!["apple", "banana"]
        );
    }

    #[test]
    fn test_frequency_ties_break_lexically() {
        // every term occurs once; the cap keeps the lexically smallest
        let cv = CountVectorizer::fit(&["delta alpha", "charlie bravo"], params(3)).unwrap();
        assert_eq!(
            cv.vocabulary().terms().collect::<Vec<_>>(),
            vec!["alpha", "bravo", "charlie"]
        );
    }

    #[test]
    fn test_counts_and_unknown_terms() {
        let cv = CountVectorizer::fit(&["cat dog", "dog dog"], params(10)).unwrap();
        let counts = cv.transform(&["dog cat dog zzz", ""]);
        assert_eq!(counts.shape(), (2, 2));
        assert_eq!(counts.get(0, 0), Some(&1.0));
        assert_eq!(counts.get(0, 1), Some(&2.0));
        assert_eq!(counts.outer_view(1).map(|row| row.nnz()), Some(0));
    }

    #[test]
    fn test_fit_transform_matches_fit_then_transform() {
        let texts = ["one two two", "three one"];
        let (cv, fitted) = CountVectorizer::fit_transform(&texts, params(10)).unwrap();
        let transformed = cv.transform(&texts);
        assert_eq!(fitted, transformed);
    }

    #[test]
    fn test_min_df_filters_rare_terms() {
        let params = VectorizerParams::new(10, 1..=1, 2.0, 1.0, false).unwrap();
        let cv = CountVectorizer::fit(&["cat dog", "dog bird", "dog cat"], params).unwrap();
        assert_eq!(cv.vocabulary().terms().collect::<Vec<_>>(), vec!["cat", "dog"]);
    }

    #[test]
    fn test_max_df_filters_ubiquitous_terms() {
        let params = VectorizerParams::new(10, 1..=1, 1.0, 0.5, false).unwrap();
        let cv = CountVectorizer::fit(&["the cat", "the dog", "the bird", "the end"], params)
            .unwrap();
        assert_eq!(cv.vocabulary().get("the"), None);
        assert_eq!(cv.num_features(), 4);
    }

    #[test]
    fn test_bigrams() {
        let params = VectorizerParams::new(10, 1..=2, 1.0, 1.0, false).unwrap();
        let cv = CountVectorizer::fit(&["big dog"], params).unwrap();
        assert_eq!(
            cv.vocabulary().terms().collect::<Vec<_>>(),
            vec!["big", "big dog", "dog"]
        );
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let texts: [&str; 0] = [];
        assert!(matches!(
            CountVectorizer::fit(&texts, params(10)),
            Err(FeatureError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_corpus_without_terms_is_rejected() {
        assert!(matches!(
            CountVectorizer::fit(&["", "a b c", "!!"], params(10)),
            Err(FeatureError::EmptyVocabulary)
        ));
    }

    #[test]
    fn test_inverted_df_bounds_are_rejected() {
        let params = VectorizerParams::new(10, 1..=1, 3.0, 0.5, false).unwrap();
        assert!(matches!(
            CountVectorizer::fit(&["cat", "dog"], params),
            Err(FeatureError::InvalidParams(_))
        ));
    }
}
