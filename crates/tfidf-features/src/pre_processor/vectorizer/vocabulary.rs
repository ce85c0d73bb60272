use ahash::AHashMap as HashMap;

/// Term → column index mapping learned from a training corpus.
///
/// Columns are assigned in lexical order of the terms, so the same training
/// corpus always yields the same layout. A `Vocabulary` has no mutating API.
#[derive(Clone, Debug)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Builds a vocabulary from distinct terms, assigning columns in sorted order.
    pub(crate) fn from_terms(mut terms: Vec<String>) -> Self {
        terms.sort_unstable();
        terms.dedup();
        let index = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();
        Self { terms, index }
    }

    #[must_use]
    pub fn get(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    #[must_use]
    pub fn term(&self, column: usize) -> Option<&str> {
        self.terms.get(column).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in column order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    #[must_use]
    pub fn to_map(&self) -> HashMap<String, usize> {
        self.index.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_lexical_order() {
        let vocab = Vocabulary::from_terms(vec!["dog".into(), "cat".into(), "ant".into()]);
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get("ant"), Some(0));
        assert_eq!(vocab.get("cat"), Some(1));
        assert_eq!(vocab.get("dog"), Some(2));
        assert_eq!(vocab.term(2), Some("dog"));
        assert_eq!(vocab.get("zzz"), None);
        assert_eq!(vocab.terms().collect::<Vec<_>>(), vec!["ant", "cat", "dog"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let vocab = Vocabulary::from_terms(vec!["b".into(), "a".into(), "b".into()]);
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.to_map().get("b"), Some(&1));
    }
}
