use crate::document::{Document, DocumentSchema};
use crate::normalize::normalize;
use crate::tokenizer::Analyzer;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

const PROGRESS_EVERY: usize = 20;

/// Stemmed tokens of one document, in text order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub id: String,
    pub tokens: Vec<String>,
}

/// Processed documents keyed by identifier, kept in the order identifiers were
/// first seen. Inserting an identifier twice replaces the earlier tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedCorpus {
    docs: Vec<ProcessedDocument>,
    positions: HashMap<String, usize>,
}

impl ProcessedCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, tokens: Vec<String>) {
        match self.positions.get(&id) {
            Some(&pos) => self.docs[pos].tokens = tokens,
            None => {
                self.positions.insert(id.clone(), self.docs.len());
                self.docs.push(ProcessedDocument { id, tokens });
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.positions.get(id).map(|&pos| self.docs[pos].tokens.as_slice())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn documents(&self) -> &[ProcessedDocument] {
        &self.docs
    }
}

impl FromIterator<(String, Vec<String>)> for ProcessedCorpus {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut corpus = Self::new();
        for (id, tokens) in iter {
            corpus.insert(id, tokens);
        }
        corpus
    }
}

/// Turns raw documents into stemmed token lists:
/// normalize each field, tokenize, drop non-alphanumeric tokens and stopwords, stem.
#[derive(Debug, Clone, Copy)]
pub struct DocumentProcessor<'a> {
    analyzer: &'a Analyzer,
    schema: &'a DocumentSchema,
}

impl<'a> DocumentProcessor<'a> {
    pub fn new(analyzer: &'a Analyzer, schema: &'a DocumentSchema) -> Self {
        Self { analyzer, schema }
    }

    /// Normalized schema fields joined by spaces, in schema order.
    pub fn combined_text(&self, doc: &Document) -> String {
        let mut text = String::new();
        for field in &self.schema.fields {
            text.push_str(&normalize(doc.text(field)));
            text.push(' ');
        }
        text
    }

    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.analyzer
            .tokenize(text)
            .into_iter()
            .filter(|t| is_alphanumeric(t) && !self.analyzer.is_stopword(t))
            .map(|t| self.analyzer.stem(&t))
            .collect()
    }

    /// `None` when the document has no usable identifier.
    pub fn process(&self, doc: &Document) -> Option<(String, Vec<String>)> {
        let id = doc.id(&self.schema.id_field)?;
        let tokens = self.tokens(&self.combined_text(doc));
        Some((id, tokens))
    }

    /// Process every document on the rayon pool. Output order follows input order.
    pub fn process_all(&self, docs: &[Document]) -> ProcessedCorpus {
        let total = docs.len();
        let done = AtomicUsize::new(0);
        let processed: Vec<Option<(String, Vec<String>)>> = docs
            .par_iter()
            .map(|doc| {
                let out = self.process(doc);
                if out.is_some() {
                    let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                    if n % PROGRESS_EVERY == 0 {
                        tracing::debug!(processed = n, total, "processing documents");
                    }
                }
                out
            })
            .collect();
        let corpus: ProcessedCorpus = processed.into_iter().flatten().collect();
        tracing::info!(documents = corpus.len(), skipped = total - done.into_inner(), "document processing complete");
        corpus
    }
}

fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;
    use crate::tokenizer::{StopwordFilter, Stemmer, Tokenizer};
    use serde_json::json;

    struct Whitespace;
    impl Tokenizer for Whitespace {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }
    }

    struct NoStopwords;
    impl StopwordFilter for NoStopwords {
        fn is_stopword(&self, _token: &str) -> bool {
            false
        }
    }

    struct Upper;
    impl Stemmer for Upper {
        fn stem(&self, token: &str) -> String {
            token.to_uppercase()
        }
    }

    #[test]
    fn concatenates_fields_in_schema_order() {
        let analyzer = Analyzer::default();
        let schema = DocumentSchema::default();
        let processor = DocumentProcessor::new(&analyzer, &schema);
        let doc = Document::from(json!({
            "idMeal": "1",
            "strArea": "Brazilian",
            "strMeal": "Bolo!",
            "strCategory": null,
        }));
        assert_eq!(processor.combined_text(&doc), "bolo   brazilian ");
    }

    #[test]
    fn filters_stopwords_then_stems() {
        let analyzer = Analyzer::for_language(Language::Portuguese);
        let schema = DocumentSchema::default();
        let processor = DocumentProcessor::new(&analyzer, &schema);
        let doc = Document::from(json!({"idMeal": "1", "strMeal": "Bolo de Chocolate"}));
        let (id, tokens) = processor.process(&doc).unwrap();
        assert_eq!(id, "1");
        assert_eq!(tokens, vec![analyzer.stem("bolo"), analyzer.stem("chocolate")]);
    }

    #[test]
    fn capabilities_are_swappable() {
        let analyzer = Analyzer::new(Whitespace, NoStopwords, Upper);
        let schema = DocumentSchema::new("id", ["body"]);
        let processor = DocumentProcessor::new(&analyzer, &schema);
        let doc = Document::from(json!({"id": "a", "body": "o bolo – bom"}));
        let (_, tokens) = processor.process(&doc).unwrap();
        // "–" is not alphanumeric and never reaches the stemmer
        assert_eq!(tokens, vec!["O", "BOLO", "BOM"]);
    }

    #[test]
    fn skips_documents_without_identifier() {
        let analyzer = Analyzer::default();
        let schema = DocumentSchema::default();
        let processor = DocumentProcessor::new(&analyzer, &schema);
        let docs = vec![
            Document::from(json!({"idMeal": "", "strMeal": "Pudim"})),
            Document::from(json!({"strMeal": "Quindim"})),
            Document::from(json!({"idMeal": "3", "strMeal": "Cuscuz"})),
        ];
        let corpus = processor.process_all(&docs);
        assert_eq!(corpus.len(), 1);
        assert!(corpus.get("3").is_some());
    }

    #[test]
    fn duplicate_identifier_keeps_latest_tokens_at_first_position() {
        let corpus: ProcessedCorpus = vec![
            ("1".to_string(), vec!["a".to_string()]),
            ("2".to_string(), vec!["b".to_string()]),
            ("1".to_string(), vec!["c".to_string()]),
        ]
        .into_iter()
        .collect();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents()[0].id, "1");
        assert_eq!(corpus.get("1").unwrap(), ["c".to_string()]);
    }
}
