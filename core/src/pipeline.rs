//! The indexing run: decide whether the cached index is still valid, and
//! rebuild it from the document collection when it is not.

use crate::config::IndexerConfig;
use crate::document::{Document, DocumentSchema};
use crate::error::Result;
use crate::index::InvertedIndex;
use crate::persist;
use crate::processor::DocumentProcessor;
use crate::staleness::{self, Freshness, StaleReason};
use crate::tokenizer::Analyzer;

/// Where the returned index came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Reused,
    Rebuilt(StaleReason),
}

#[derive(Debug)]
pub struct BuildReport {
    pub index: InvertedIndex,
    pub origin: Origin,
    /// Outcome of writing a rebuilt index. The index above is valid either way.
    pub persisted: Result<()>,
}

/// Reuse the index artifact if it is newer than the source, otherwise rebuild.
/// A cached index that fails to load is rebuilt rather than reported.
pub fn run(config: &IndexerConfig) -> Result<BuildReport> {
    match staleness::check(&config.source, &config.index) {
        Freshness::Fresh => {
            tracing::info!(index = %config.index.display(), "index is up to date, loading");
            match persist::load_index(&config.index) {
                Ok(index) => Ok(BuildReport { index, origin: Origin::Reused, persisted: Ok(()) }),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load cached index, rebuilding");
                    rebuild(config, StaleReason::IndexUnreadable)
                }
            }
        }
        Freshness::Stale(reason) => {
            tracing::info!(%reason, index = %config.index.display(), "building index");
            rebuild(config, reason)
        }
    }
}

/// Load the source collection, build the index and persist it.
///
/// Failing to load the source is fatal; failing to persist is only recorded in
/// [`BuildReport::persisted`].
pub fn rebuild(config: &IndexerConfig, reason: StaleReason) -> Result<BuildReport> {
    let docs = persist::load_documents(&config.source)?;
    let analyzer = Analyzer::for_language(config.language);
    let index = build_index(&docs, &analyzer, &config.schema);

    let persisted = persist::save_index(&config.index, &index);
    if let Err(err) = &persisted {
        tracing::warn!(error = %err, "failed to save index");
    }
    Ok(BuildReport { index, origin: Origin::Rebuilt(reason), persisted })
}

pub fn build_index(docs: &[Document], analyzer: &Analyzer, schema: &DocumentSchema) -> InvertedIndex {
    let corpus = DocumentProcessor::new(analyzer, schema).process_all(docs);
    InvertedIndex::build_par(&corpus)
}
