//! Catalog query parameters: a free-text term plus facet selections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named filter dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Modality,
    Task,
    Organ,
    Dimension,
    Year,
    Direction,
    Venue,
}

impl Facet {
    /// All facets, in display order
    pub const ALL: [Facet; 7] = [
        Facet::Modality,
        Facet::Task,
        Facet::Organ,
        Facet::Dimension,
        Facet::Year,
        Facet::Direction,
        Facet::Venue,
    ];

    /// Facet identifier
    pub fn name(&self) -> &'static str {
        match self {
            Facet::Modality => "modality",
            Facet::Task => "task",
            Facet::Organ => "organ",
            Facet::Dimension => "dimension",
            Facet::Year => "year",
            Facet::Direction => "direction",
            Facet::Venue => "venue",
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Unknown facet name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown facet: {0}")]
pub struct ParseFacetError(pub String);

impl std::str::FromStr for Facet {
    type Err = ParseFacetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Facet::ALL
            .into_iter()
            .find(|f| f.name() == lowered)
            .ok_or_else(|| ParseFacetError(s.to_string()))
    }
}

/// Query against a single catalog.
///
/// A facet absent from `facets` is unconstrained. There is no "all" sentinel,
/// so a facet value literally named "all" is matched like any other value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Free-text term matched case-insensitively as a substring
    #[serde(default)]
    pub term: String,

    /// Selected value per facet, matched exactly
    #[serde(default)]
    pub facets: BTreeMap<Facet, String>,
}

impl CatalogQuery {
    /// Create a query with a free-text term and no facet selections
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            facets: BTreeMap::new(),
        }
    }

    /// Select a facet value
    pub fn facet(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.facets.insert(facet, value.into());
        self
    }

    /// Select a facet value, or leave the facet unconstrained on `None`
    pub fn facet_opt(mut self, facet: Facet, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => {
                self.facets.insert(facet, v.into());
            }
            None => {
                self.facets.remove(&facet);
            }
        }
        self
    }

    /// Clear the term and every facet selection
    pub fn reset(&mut self) {
        self.term.clear();
        self.facets.clear();
    }

    /// Selected value for a facet, if any
    pub fn selection(&self, facet: Facet) -> Option<&str> {
        self.facets.get(&facet).map(String::as_str)
    }

    /// Whether the term or any facet narrows the result
    pub fn is_unconstrained(&self) -> bool {
        self.term.trim().is_empty() && self.facets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_round_trip_names() {
        for facet in Facet::ALL {
            assert_eq!(facet.name().parse::<Facet>().unwrap(), facet);
        }
        assert_eq!(
            "bogus".parse::<Facet>(),
            Err(ParseFacetError("bogus".to_string()))
        );
    }

    #[test]
    fn test_facet_opt_none_removes() {
        let query = CatalogQuery::new("")
            .facet(Facet::Modality, "CT")
            .facet_opt(Facet::Modality, None::<String>);
        assert!(query.facets.is_empty());
        assert!(query.is_unconstrained());
    }

    #[test]
    fn test_reset() {
        let mut query = CatalogQuery::new("brain").facet(Facet::Task, "Seg");
        assert_eq!(query.selection(Facet::Task), Some("Seg"));
        assert!(!query.is_unconstrained());

        query.reset();
        assert!(query.is_unconstrained());
    }

    #[test]
    fn test_all_is_an_ordinary_value() {
        let query = CatalogQuery::new("").facet(Facet::Task, "all");
        assert_eq!(query.selection(Facet::Task), Some("all"));
        assert!(!query.is_unconstrained());
    }
}
