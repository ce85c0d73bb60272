//! CSV ingestion and egress.

mod loader;
mod writer;

pub use loader::{Corpus, RecordTable, load_data};
pub use writer::{encode_csv, save_data, write_bytes};
