//! Core data models for catalog records and queries.

mod dataset;
mod language;
mod paper;
mod query;

pub use dataset::{GeneralDataset, MedicalDataset, PLACEHOLDER};
pub use language::Language;
pub use paper::{Direction, Paper, PaperBuilder};
pub use query::{CatalogQuery, Facet, ParseFacetError};
