mod vectorizer;

pub use vectorizer::{TfidfVectorizer, VectorizerParams, Vocabulary, to_dense, tokenize_text};
