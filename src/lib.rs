//! # Research Bank
//!
//! A catalog of research papers, topical directions and public datasets, with
//! free-text search, facet filtering and pagination.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, Direction, datasets, queries)
//! - [`ingest`]: Flat-file parsing and projection into typed records
//! - [`library`]: Papers and directions compiled into the crate
//! - [`sources`]: Where dataset catalogs are fetched from (HTTP, directory, memory)
//! - [`store`]: Loaded catalogs and their load status
//! - [`query`]: Search and facet filtering
//! - [`pagination`]: Page slicing and pager markers
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal output helpers
//! - [`utils`]: HTTP client

pub mod config;
pub mod ingest;
pub mod library;
pub mod models;
pub mod pagination;
pub mod query;
pub mod sources;
pub mod store;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use library::Library;
pub use models::{CatalogQuery, Facet, GeneralDataset, Language, MedicalDataset, Paper};
pub use pagination::{paginate, Page};
pub use query::query;
pub use store::{CatalogStore, LoadStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
