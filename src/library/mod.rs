//! The compiled-in research library: curated papers and their directions.
//!
//! Both tables are embedded at build time from `data/papers.json` and
//! `data/directions.json`. [`Library::new`] enforces that direction ids are
//! unique, paper ids are unique and every paper's `direction` refers to a
//! known direction.

use std::collections::{BTreeMap, HashSet};

use crate::models::{Direction, Paper};

const PAPERS_JSON: &str = include_str!("../../data/papers.json");
const DIRECTIONS_JSON: &str = include_str!("../../data/directions.json");

/// Errors building a library
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate direction id: {0}")]
    DuplicateDirection(String),

    #[error("Duplicate paper id: {0}")]
    DuplicatePaper(String),

    #[error("Paper {paper} references unknown direction {direction}")]
    UnknownDirection { paper: String, direction: String },
}

/// Papers and directions, validated against each other
#[derive(Debug, Clone)]
pub struct Library {
    papers: Vec<Paper>,
    directions: Vec<Direction>,
}

impl Library {
    /// Build a library, checking id uniqueness and direction references
    pub fn new(papers: Vec<Paper>, directions: Vec<Direction>) -> Result<Self, LibraryError> {
        let mut direction_ids = HashSet::new();
        for direction in &directions {
            if !direction_ids.insert(direction.id.as_str()) {
                return Err(LibraryError::DuplicateDirection(direction.id.clone()));
            }
        }

        let mut paper_ids = HashSet::new();
        for paper in &papers {
            if !paper_ids.insert(paper.id.as_str()) {
                return Err(LibraryError::DuplicatePaper(paper.id.clone()));
            }
            if !direction_ids.contains(paper.direction.as_str()) {
                return Err(LibraryError::UnknownDirection {
                    paper: paper.id.clone(),
                    direction: paper.direction.clone(),
                });
            }
        }

        Ok(Self { papers, directions })
    }

    /// The library compiled into this binary
    pub fn embedded() -> Result<Self, LibraryError> {
        let papers: Vec<Paper> = serde_json::from_str(PAPERS_JSON)?;
        let directions: Vec<Direction> = serde_json::from_str(DIRECTIONS_JSON)?;
        let library = Self::new(papers, directions)?;

        tracing::debug!(
            papers = library.papers.len(),
            directions = library.directions.len(),
            "Loaded embedded library"
        );
        Ok(library)
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Look up a direction by id
    pub fn direction(&self, id: &str) -> Option<&Direction> {
        self.directions.iter().find(|d| d.id == id)
    }

    /// Papers filed under a direction, in library order
    pub fn papers_by_direction(&self, direction_id: &str) -> Vec<&Paper> {
        self.papers
            .iter()
            .filter(|p| p.direction == direction_id)
            .collect()
    }

    /// Paper count per direction id; directions without papers count 0
    pub fn direction_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = self
            .directions
            .iter()
            .map(|d| (d.id.as_str(), 0))
            .collect();
        for paper in &self.papers {
            if let Some(count) = counts.get_mut(paper.direction.as_str()) {
                *count += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Language, PaperBuilder};

    fn direction(id: &str) -> Direction {
        Direction {
            id: id.to_string(),
            name: id.to_uppercase(),
            name_zh: id.to_string(),
            description: String::new(),
            description_zh: String::new(),
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_embedded_library_is_valid() {
        let library = Library::embedded().unwrap();
        assert_eq!(library.directions().len(), 10);
        assert_eq!(library.papers().len(), 24);

        let cv = library.direction("cv").unwrap();
        assert_eq!(cv.display_name(Language::Zh), "计算机视觉");
        assert!(!library.papers_by_direction("cv").is_empty());
    }

    #[test]
    fn test_direction_counts_cover_all_directions() {
        let library = Library::embedded().unwrap();
        let counts = library.direction_counts();
        assert_eq!(counts.len(), library.directions().len());
        assert_eq!(counts.values().sum::<usize>(), library.papers().len());
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let papers = vec![PaperBuilder::new("1", "T", "nope").build()];
        let err = Library::new(papers, vec![direction("cv")]).unwrap_err();
        assert!(matches!(err, LibraryError::UnknownDirection { .. }));
    }

    #[test]
    fn test_duplicate_direction_rejected() {
        let err = Library::new(Vec::new(), vec![direction("cv"), direction("cv")]).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateDirection(id) if id == "cv"));
    }

    #[test]
    fn test_duplicate_paper_rejected() {
        let papers = vec![
            PaperBuilder::new("1", "A", "cv").build(),
            PaperBuilder::new("1", "B", "cv").build(),
        ];
        let err = Library::new(papers, vec![direction("cv")]).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicatePaper(_)));
    }
}
