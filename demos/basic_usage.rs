//! Basic usage example for the Research Bank library.
//!
//! Loads the bundled dataset catalogs, filters the medical catalog and prints
//! one page of results, then searches the compiled-in papers.

use research_bank::models::{CatalogQuery, Facet, Language};
use research_bank::pagination::paginate;
use research_bank::query::{facet_values, query};
use research_bank::sources::DirSource;
use research_bank::store::CatalogStore;
use research_bank::Library;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");

    let mut store = CatalogStore::default();
    if let Some(message) = store.load(&DirSource::new(data_dir)).await.message(Language::En) {
        eprintln!("{}", message);
        return Ok(());
    }

    println!(
        "Loaded {} general and {} medical datasets",
        store.general().len(),
        store.medical().len()
    );
    println!(
        "Medical modalities: {}\n",
        facet_values(store.medical(), Facet::Modality).join(", ")
    );

    let ct_seg = CatalogQuery::new("")
        .facet(Facet::Modality, "CT")
        .facet(Facet::Task, "Seg");
    let results = query(store.medical(), &ct_seg);
    let page = paginate(&results, 5, 1);

    println!("CT segmentation datasets (page 1 of {}):", page.total_pages);
    for dataset in page.items {
        println!("  {} ({}) - {}", dataset.name, dataset.year_label(), dataset.organ);
    }

    let library = Library::embedded()?;
    let transformers = query(library.papers(), &CatalogQuery::new("transformer"));
    println!("\nPapers mentioning \"transformer\": {}", transformers.len());
    for paper in transformers.iter().take(3) {
        let direction = library
            .direction(&paper.direction)
            .map(|d| d.display_name(Language::En))
            .unwrap_or("?");
        println!("  [{}] {} ({})", direction, paper.title, paper.year);
    }

    Ok(())
}
