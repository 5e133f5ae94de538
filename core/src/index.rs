use crate::processor::{ProcessedCorpus, ProcessedDocument};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Term -> identifiers of the documents containing it.
///
/// Each posting list holds an identifier at most once, in the order documents
/// were folded in. That order is not meaningful to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold every processed document into a fresh index.
    pub fn build(corpus: &ProcessedCorpus) -> Self {
        let index = corpus.documents().iter().fold(Self::new(), Self::with_document);
        tracing::info!(terms = index.len(), "inverted index built");
        index
    }

    /// Same result as [`InvertedIndex::build`], folding partitions of the
    /// corpus in parallel and merging them left to right.
    pub fn build_par(corpus: &ProcessedCorpus) -> Self {
        let index = corpus
            .documents()
            .par_iter()
            .fold(Self::new, Self::with_document)
            .reduce(Self::new, Self::merge);
        tracing::info!(terms = index.len(), "inverted index built");
        index
    }

    fn with_document(mut self, doc: &ProcessedDocument) -> Self {
        self.add_document(&doc.id, &doc.tokens);
        self
    }

    /// Record `id` under every distinct term in `tokens`.
    fn add_document(&mut self, id: &str, tokens: &[String]) {
        let mut seen: HashSet<&str> = HashSet::new();
        for token in tokens {
            if seen.insert(token.as_str()) {
                self.postings.entry(token.clone()).or_default().push(id.to_string());
            }
        }
    }

    /// Append `other`'s postings after ours. Partitions of a corpus never share
    /// a document, so no id can be duplicated by the concatenation.
    fn merge(mut self, other: Self) -> Self {
        for (term, ids) in other.postings {
            self.postings.entry(term).or_default().extend(ids);
        }
        self
    }

    pub fn postings(&self, term: &str) -> Option<&[String]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.postings.iter().map(|(t, ids)| (t.as_str(), ids.as_slice()))
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
