//! Query engine: free-text search and facet filtering over in-memory catalogs.
//!
//! Every function here is pure over its inputs. [`query`] is a stable filter,
//! so results keep catalog order, and calling it twice with the same
//! arguments yields the same sequence.
//!
//! A record matches when
//!
//! 1. the term is empty, or its lowercase form is a substring of at least one
//!    of the record's [`Searchable::search_fields`] (also lowercased), and
//! 2. for every selected facet, the record's value for that facet equals the
//!    selection exactly (case-sensitive).
//!
//! Selecting a facet the record type does not carry excludes every record.
//!
//! Papers trim the term first, so a whitespace-only term lists every paper.
//! Datasets do not: `"  "` is an ordinary substring search there.

use std::borrow::Cow;
use std::collections::BTreeSet;

use crate::models::{CatalogQuery, Facet, GeneralDataset, MedicalDataset, Paper};

/// A catalog record the query engine can search and filter
pub trait Searchable {
    /// Whether surrounding whitespace is stripped from the term before matching
    const TRIM_TERM: bool = false;

    /// Values the free-text term is matched against
    fn search_fields(&self) -> Vec<&str>;

    /// Value of a facet, or `None` if this record type has no such facet
    fn facet_value(&self, facet: Facet) -> Option<Cow<'_, str>>;
}

impl Searchable for Paper {
    const TRIM_TERM: bool = true;

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2 + self.authors.len() + self.tags.len());
        fields.push(self.title.as_str());
        fields.extend(self.authors.iter().map(String::as_str));
        fields.push(self.r#abstract.as_str());
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet_value(&self, facet: Facet) -> Option<Cow<'_, str>> {
        match facet {
            Facet::Direction => Some(Cow::Borrowed(&self.direction)),
            Facet::Venue => Some(Cow::Borrowed(&self.venue)),
            Facet::Year => Some(year_value(self.year)),
            _ => None,
        }
    }
}

impl Searchable for GeneralDataset {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.description.as_str(),
            self.modality.as_str(),
            self.task.as_str(),
        ]
    }

    fn facet_value(&self, facet: Facet) -> Option<Cow<'_, str>> {
        match facet {
            Facet::Modality => Some(Cow::Borrowed(&self.modality)),
            Facet::Task => Some(Cow::Borrowed(&self.task)),
            _ => None,
        }
    }
}

impl Searchable for MedicalDataset {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.modality.as_str(),
            self.organ.as_str(),
            self.task.as_str(),
        ]
    }

    fn facet_value(&self, facet: Facet) -> Option<Cow<'_, str>> {
        match facet {
            Facet::Modality => Some(Cow::Borrowed(&self.modality)),
            Facet::Organ => Some(Cow::Borrowed(&self.organ)),
            Facet::Task => Some(Cow::Borrowed(&self.task)),
            Facet::Dimension => Some(Cow::Borrowed(&self.dimension)),
            Facet::Year => Some(year_value(self.year)),
            _ => None,
        }
    }
}

// Unknown year (0) has no facet value
fn year_value(year: i32) -> Cow<'static, str> {
    if year == 0 {
        Cow::Borrowed("")
    } else {
        Cow::Owned(year.to_string())
    }
}

/// Whether a record satisfies the free-text term
pub fn matches_term<T: Searchable>(record: &T, term: &str) -> bool {
    let term = if T::TRIM_TERM { term.trim() } else { term };
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    record
        .search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Whether a record satisfies every facet selection
pub fn matches_facets<T: Searchable>(record: &T, query: &CatalogQuery) -> bool {
    query.facets.iter().all(|(facet, selected)| {
        record
            .facet_value(*facet)
            .is_some_and(|value| value == selected.as_str())
    })
}

/// Whether a record satisfies the whole query
pub fn matches<T: Searchable>(record: &T, query: &CatalogQuery) -> bool {
    matches_term(record, &query.term) && matches_facets(record, query)
}

/// Filter a catalog, preserving its order
pub fn query<'a, T: Searchable>(catalog: &'a [T], query: &CatalogQuery) -> Vec<&'a T> {
    catalog
        .iter()
        .filter(|record| matches(*record, query))
        .collect()
}

/// Distinct non-empty values of a facet present in a catalog, sorted ascending
pub fn facet_values<T: Searchable>(catalog: &[T], facet: Facet) -> Vec<String> {
    catalog
        .iter()
        .filter_map(|record| record.facet_value(facet))
        .filter(|value| !value.is_empty())
        .map(Cow::into_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaperBuilder;

    fn medical(name: &str, modality: &str, organ: &str, task: &str) -> MedicalDataset {
        let mut dataset = MedicalDataset::new(name, name);
        dataset.modality = modality.to_string();
        dataset.organ = organ.to_string();
        dataset.task = task.to_string();
        dataset
    }

    fn catalog() -> Vec<MedicalDataset> {
        vec![
            medical("A", "CT", "Liver", "Seg"),
            medical("B", "MR", "Brain", "Cls"),
            medical("C", "CT", "Lung", "Cls"),
            medical("D", "X-Ray", "Lung", "Det"),
        ]
    }

    fn names(records: &[&MedicalDataset]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_single_facet() {
        let catalog = vec![medical("A", "CT", "", "Seg"), medical("B", "MR", "", "Cls")];
        let result = query(&catalog, &CatalogQuery::new("").facet(Facet::Modality, "CT"));
        assert_eq!(names(&result), vec!["A"]);
    }

    #[test]
    fn test_facets_are_anded() {
        let catalog = catalog();
        let q = CatalogQuery::new("")
            .facet(Facet::Modality, "CT")
            .facet(Facet::Task, "Cls");
        // A matches modality only, B matches task only
        assert_eq!(names(&query(&catalog, &q)), vec!["C"]);
    }

    #[test]
    fn test_term_case_insensitive_substring() {
        let catalog = catalog();
        assert_eq!(names(&query(&catalog, &CatalogQuery::new("LUN"))), vec!["C", "D"]);
        assert_eq!(names(&query(&catalog, &CatalogQuery::new("x-ray"))), vec!["D"]);
    }

    #[test]
    fn test_empty_term_matches_all() {
        let catalog = catalog();
        assert_eq!(query(&catalog, &CatalogQuery::new("")).len(), 4);
    }

    #[test]
    fn test_whitespace_term_is_substring_search_for_datasets() {
        let catalog = catalog();
        assert!(query(&catalog, &CatalogQuery::new("   ")).is_empty());

        let mut coco = GeneralDataset::new("1", "COCO");
        coco.description = "Common Objects in Context".to_string();
        let mnist = GeneralDataset::new("2", "MNIST");
        let general = vec![coco, mnist];
        let result = query(&general, &CatalogQuery::new(" "));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "COCO");
    }

    #[test]
    fn test_whitespace_term_matches_all_papers() {
        let papers = vec![
            PaperBuilder::new("1", "ResNet", "cv").build(),
            PaperBuilder::new("2", "BERT", "ml").build(),
        ];
        assert_eq!(query(&papers, &CatalogQuery::new("   ")).len(), 2);
        assert_eq!(query(&papers, &CatalogQuery::new("  resnet ")).len(), 1);
    }

    #[test]
    fn test_facet_exact_match_only() {
        let catalog = catalog();
        assert!(query(&catalog, &CatalogQuery::new("").facet(Facet::Modality, "ct")).is_empty());
        assert!(query(&catalog, &CatalogQuery::new("").facet(Facet::Modality, "C")).is_empty());
    }

    #[test]
    fn test_unknown_facet_value_empty() {
        let catalog = catalog();
        let q = CatalogQuery::new("").facet(Facet::Task, "Reg");
        assert!(query(&catalog, &q).is_empty());
    }

    #[test]
    fn test_facet_not_carried_by_record_type() {
        let catalog = catalog();
        let q = CatalogQuery::new("").facet(Facet::Direction, "cv");
        assert!(query(&catalog, &q).is_empty());
    }

    #[test]
    fn test_order_preserved_and_idempotent() {
        let catalog = catalog();
        let q = CatalogQuery::new("").facet(Facet::Task, "Cls");
        let first = query(&catalog, &q);
        let second = query(&catalog, &q);
        assert_eq!(names(&first), vec!["B", "C"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_facet_values_sorted_distinct_non_empty() {
        let mut catalog = catalog();
        catalog.push(medical("E", "", "Heart", "Seg"));

        assert_eq!(
            facet_values(&catalog, Facet::Modality),
            vec!["CT", "MR", "X-Ray"]
        );
        assert_eq!(facet_values(&catalog, Facet::Task), vec!["Cls", "Det", "Seg"]);
        assert!(facet_values(&catalog, Facet::Venue).is_empty());
    }

    #[test]
    fn test_medical_year_facet_skips_unknown() {
        let mut a = medical("A", "CT", "Liver", "Seg");
        a.year = 2019;
        let b = medical("B", "CT", "Liver", "Seg");
        let catalog = vec![a, b];

        assert_eq!(facet_values(&catalog, Facet::Year), vec!["2019"]);
        let q = CatalogQuery::new("").facet(Facet::Year, "2019");
        assert_eq!(names(&query(&catalog, &q)), vec!["A"]);
    }

    #[test]
    fn test_paper_search_fields() {
        let paper = PaperBuilder::new("1", "Deep Residual Learning", "cv")
            .author("Kaiming He")
            .abstract_text("We present a residual learning framework.")
            .tag("CNN")
            .build();
        let catalog = vec![paper];

        assert_eq!(query(&catalog, &CatalogQuery::new("kaiming")).len(), 1);
        assert_eq!(query(&catalog, &CatalogQuery::new("framework")).len(), 1);
        assert_eq!(query(&catalog, &CatalogQuery::new("cnn")).len(), 1);
        assert!(query(&catalog, &CatalogQuery::new("transformer")).is_empty());
        assert_eq!(
            query(&catalog, &CatalogQuery::new("").facet(Facet::Direction, "cv")).len(),
            1
        );
    }

    #[test]
    fn test_general_searches_description() {
        let mut dataset = GeneralDataset::new("1", "COCO");
        dataset.description = "Common Objects in Context".to_string();
        let catalog = vec![dataset];

        assert_eq!(query(&catalog, &CatalogQuery::new("objects")).len(), 1);
    }
}
