use ahash::AHashMap as HashMap;

/// Counts the word n-grams of every size in `ngram_range` within one document.
///
/// Multi-word terms are the tokens joined by a single space.
pub fn count_ngrams(tokens: &[String], ngram_range: &[usize]) -> HashMap<String, usize> {
    let mut ngram_counter = HashMap::new();

    for &n in ngram_range {
        if n == 1 {
            for token in tokens {
                *ngram_counter.entry(token.clone()).or_insert(0) += 1;
            }
            continue;
        }
        for window in tokens.windows(n) {
            *ngram_counter.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    ngram_counter
}

/// Per-term corpus statistics gathered while fitting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TermStats {
    /// Number of documents containing the term.
    pub doc_freq: usize,
    /// Occurrences of the term summed over all documents.
    pub total_freq: usize,
}

pub fn build_term_stats(ngram_maps: &[HashMap<String, usize>]) -> HashMap<String, TermStats> {
    let mut stats: HashMap<String, TermStats> = HashMap::new();

    for ngrams in ngram_maps {
        for (term, &count) in ngrams {
            let entry = stats.entry(term.clone()).or_default();
            entry.doc_freq += 1;
            entry.total_freq += count;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_unigram_counts() {
        let counts = count_ngrams(&tokens(&["dog", "cat", "dog"]), &[1]);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("dog"), Some(&2));
        assert_eq!(counts.get("cat"), Some(&1));
    }

    #[test]
    fn test_mixed_ngram_sizes() {
        let counts = count_ngrams(&tokens(&["the", "big", "dog"]), &[1, 2]);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts.get("the big"), Some(&1));
        assert_eq!(counts.get("big dog"), Some(&1));
    }

    #[test]
    fn test_ngram_longer_than_document() {
        let counts = count_ngrams(&tokens(&["solo"]), &[2, 3]);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_term_stats_separate_doc_and_total_frequency() {
        let maps = vec![
            count_ngrams(&tokens(&["cat", "dog"]), &[1]),
            count_ngrams(&tokens(&["dog", "dog"]), &[1]),
        ];
        let stats = build_term_stats(&maps);
        assert_eq!(
            stats.get("dog"),
            Some(&TermStats {
                doc_freq: 2,
                total_freq: 3
            })
        );
        assert_eq!(
            stats.get("cat"),
            Some(&TermStats {
                doc_freq: 1,
                total_freq: 1
            })
        );
    }
}
