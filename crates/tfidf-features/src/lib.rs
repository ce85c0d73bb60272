//! # tfidf-features
//!
//! Feature engineering for labeled text: fits a TF-IDF vocabulary on a training
//! split and turns both the training and the test split into dense numeric
//! tables with the label carried over as the last column.
//!
//! ```rust
//! use tfidf_features::{Corpus, VectorizerParams, apply_tfidf};
//!
//! let train = Corpus::new([("cat dog", "pos"), ("dog dog", "neg")]);
//! let test = Corpus::new([("cat cat", "pos")]);
//!
//! let tables = apply_tfidf(&train, &test, VectorizerParams::with_max_features(10)?)?;
//! assert_eq!(tables.vectorizer.vocabulary().get("dog"), Some(1));
//! assert_eq!(tables.test.columns(), ["0", "1", "label"]);
//! # Ok::<(), tfidf_features::FeatureError>(())
//! ```

pub mod config;
pub mod data;
mod error;
pub mod pipeline;
pub mod pre_processor;
pub mod table;

pub use config::{FeatureEngineeringParams, Params, load_params};
pub use data::{Corpus, RecordTable, load_data, save_data};
pub use error::{FeatureError, Result};
pub use pipeline::{FeatureTables, PipelinePaths, RunSummary, apply_tfidf, run};
pub use pre_processor::{TfidfVectorizer, VectorizerParams, Vocabulary};
pub use table::{FeatureTable, LABEL_COLUMN};
