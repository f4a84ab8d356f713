//! Paper and direction models for the compiled-in research library.

use serde::{Deserialize, Serialize};

use super::Language;

/// A topical category that papers are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Direction {
    /// Unique identifier (e.g. "cv", "large-models")
    pub id: String,

    /// Display name in the default language
    pub name: String,

    /// Display name in the secondary language
    pub name_zh: String,

    /// Short description in the default language
    pub description: String,

    /// Short description in the secondary language
    pub description_zh: String,

    /// Color token used for visual tagging
    pub color: String,
}

impl Direction {
    /// Display name for the given language
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::En => &self.name,
            Language::Zh => &self.name_zh,
        }
    }

    /// Description for the given language
    pub fn display_description(&self, language: Language) -> &str {
        match language {
            Language::En => &self.description,
            Language::Zh => &self.description_zh,
        }
    }
}

/// An academic paper in the curated library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    /// Unique identifier
    pub id: String,

    /// Paper title
    pub title: String,

    /// Author names in publication order
    pub authors: Vec<String>,

    /// Publication year
    pub year: i32,

    /// Conference or journal
    pub venue: String,

    /// Abstract text
    pub r#abstract: String,

    /// One-sentence summary
    pub summary: String,

    /// Research gaps the paper addresses
    pub gaps: String,

    /// Research objectives
    pub objectives: String,

    /// Code repository URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Direction identifier this paper belongs to
    pub direction: String,

    /// Free-text tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Paper {
    /// Create a new paper with required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            authors: Vec::new(),
            year: 0,
            venue: String::new(),
            r#abstract: String::new(),
            summary: String::new(),
            gaps: String::new(),
            objectives: String::new(),
            code: None,
            direction: direction.into(),
            tags: Vec::new(),
        }
    }

    /// Authors joined for display ("A, B, C")
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Whether the paper links to a code repository
    pub fn has_code(&self) -> bool {
        self.code.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Builder for constructing Paper objects
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, direction: impl Into<String>) -> Self {
        Self {
            paper: Paper::new(id, title, direction),
        }
    }

    /// Add an author
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.paper.authors.push(author.into());
        self
    }

    /// Set publication year
    pub fn year(mut self, year: i32) -> Self {
        self.paper.year = year;
        self
    }

    /// Set venue
    pub fn venue(mut self, venue: impl Into<String>) -> Self {
        self.paper.venue = venue.into();
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.paper.r#abstract = abstract_text.into();
        self
    }

    /// Set summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.paper.summary = summary.into();
        self
    }

    /// Set code repository URL
    pub fn code(mut self, url: impl Into<String>) -> Self {
        self.paper.code = Some(url.into());
        self
    }

    /// Add a tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.paper.tags.push(tag.into());
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
