use criterion::{criterion_group, criterion_main, Criterion};
use recipe_core::document::DocumentSchema;
use recipe_core::{Analyzer, Document, DocumentProcessor, InvertedIndex};
use serde_json::json;

fn sample_documents(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| {
            Document::from(json!({
                "idMeal": i.to_string(),
                "strMeal": format!("Bolo de Chocolate nº {i}"),
                "strInstructions": "Pré-aqueça o forno a 180 graus. Misture a farinha, o açúcar e os ovos; \
                    acrescente o chocolate derretido e asse por 40 minutos, até dourar.",
                "strCategory": "Dessert",
                "strArea": "Brazilian",
            }))
        })
        .collect()
}

fn bench_processing(c: &mut Criterion) {
    let analyzer = Analyzer::default();
    let schema = DocumentSchema::default();
    let processor = DocumentProcessor::new(&analyzer, &schema);
    let docs = sample_documents(300);

    c.bench_function("process_300_recipes", |b| b.iter(|| processor.process_all(&docs)));

    let corpus = processor.process_all(&docs);
    c.bench_function("build_index_300_recipes", |b| b.iter(|| InvertedIndex::build(&corpus)));
}

criterion_group!(benches, bench_processing);
criterion_main!(benches);
