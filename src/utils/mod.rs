//! Utilities shared by the catalog sources.
//!
//! - [`HttpClient`]: pooled HTTP client with a request timeout

mod http;

pub use http::{HttpClient, DEFAULT_TIMEOUT};
