use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire name of the recipe identifier.
pub const DEFAULT_ID_FIELD: &str = "idMeal";

/// Indexable recipe fields, in concatenation order: title, instructions, category, area.
pub const DEFAULT_FIELDS: [&str; 4] = ["strMeal", "strInstructions", "strCategory", "strArea"];

/// Which record keys carry the identifier and the indexable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSchema {
    pub id_field: String,
    pub fields: Vec<String>,
}

impl DocumentSchema {
    pub fn new<I, S>(id_field: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { id_field: id_field.into(), fields: fields.into_iter().map(Into::into).collect() }
    }
}

impl Default for DocumentSchema {
    fn default() -> Self {
        Self::new(DEFAULT_ID_FIELD, DEFAULT_FIELDS)
    }
}

/// One raw record of the source collection. Every key is kept as loaded; the
/// schema decides which ones are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Identifier under `key`. Strings are taken as-is, numbers are rendered as
    /// text, and anything else (including an empty string) counts as absent.
    pub fn id(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Text under `key`; missing, null and non-string values yield `None`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }
}
