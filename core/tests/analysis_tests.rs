use recipe_core::document::DocumentSchema;
use recipe_core::{Analyzer, Document, DocumentProcessor, Language};
use serde_json::json;

fn tokens(language: Language, title: &str) -> Vec<String> {
    let analyzer = Analyzer::for_language(language);
    let schema = DocumentSchema::default();
    let doc = Document::from(json!({"idMeal": "1", "strMeal": title}));
    DocumentProcessor::new(&analyzer, &schema).process(&doc).unwrap().1
}

#[test]
fn it_normalizes_and_stems_portuguese() {
    let words = tokens(Language::Portuguese, "BOLOS, Bolo & bolo!");
    assert_eq!(words, vec!["bol", "bol", "bol"]);
}

#[test]
fn it_filters_portuguese_stopwords() {
    let words = tokens(Language::Portuguese, "Frango com quiabo e não com arroz");
    let analyzer = Analyzer::for_language(Language::Portuguese);
    let expected: Vec<String> = ["frango", "quiabo", "arroz"].iter().map(|w| analyzer.stem(w)).collect();
    assert_eq!(words, expected);
}

#[test]
fn it_switches_language() {
    let words = tokens(Language::English, "The Running of the Chickens");
    assert_eq!(words, vec!["run", "chicken"]);
}

#[test]
fn it_drops_symbol_tokens() {
    let words = tokens(Language::Portuguese, "arroz – feijão …");
    let analyzer = Analyzer::for_language(Language::Portuguese);
    assert_eq!(words, vec![analyzer.stem("arroz"), analyzer.stem("feijão")]);
}
