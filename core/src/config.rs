use crate::document::DocumentSchema;
use crate::error::IndexError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SOURCE_PATH: &str = "receitas_db.json";
pub const DEFAULT_INDEX_PATH: &str = "indice_invertido.json";

/// Language selecting the tokenizer, stopword list and stemmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Portuguese,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Portuguese => "portuguese",
            Language::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "portuguese" => Ok(Language::Portuguese),
            "en" | "english" => Ok(Language::English),
            other => Err(IndexError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Everything one indexing run needs: where the artifacts live and how to analyze text.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// Raw document collection produced by the crawler.
    pub source: PathBuf,
    /// Inverted index artifact.
    pub index: PathBuf,
    pub language: Language,
    pub schema: DocumentSchema,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE_PATH),
            index: PathBuf::from(DEFAULT_INDEX_PATH),
            language: Language::default(),
            schema: DocumentSchema::default(),
        }
    }
}
