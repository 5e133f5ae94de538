pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod processor;
pub mod staleness;
pub mod tokenizer;

pub use config::{IndexerConfig, Language};
pub use document::{Document, DocumentSchema};
pub use error::{IndexError, Result};
pub use index::InvertedIndex;
pub use processor::{DocumentProcessor, ProcessedCorpus};
pub use staleness::{Freshness, StaleReason};
pub use tokenizer::Analyzer;
