mod count_vectorizer;
mod ngrams;
mod params;
mod tfidf_vectorizer;
mod tokenizer;
mod vocabulary;

pub use params::VectorizerParams;
pub use tfidf_vectorizer::{TfidfVectorizer, to_dense};
pub use tokenizer::tokenize_text;
pub use vocabulary::Vocabulary;
