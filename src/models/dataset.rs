//! Dataset catalog records.

use serde::{Deserialize, Serialize};

/// Placeholder for dataset columns the flat files do not carry
pub const PLACEHOLDER: &str = "-";

/// A general (non-medical) dataset entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDataset {
    pub id: String,
    pub name: String,

    /// Free-text category, e.g. "RGB Image"
    pub modality: String,

    /// Sample count as published ("1.28M", "~60K"); not numeric
    pub num_samples: String,

    pub size: String,
    pub task: String,
    pub annotation: String,
    pub license: String,

    /// Download URL, empty when unknown
    pub download_url: String,

    pub description: String,
}

impl GeneralDataset {
    /// Create an entry with only a name; every other column is blank or a placeholder
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modality: String::new(),
            num_samples: String::new(),
            size: PLACEHOLDER.to_string(),
            task: String::new(),
            annotation: PLACEHOLDER.to_string(),
            license: PLACEHOLDER.to_string(),
            download_url: String::new(),
            description: String::new(),
        }
    }

    /// Whether a download link is available
    pub fn has_link(&self) -> bool {
        !self.download_url.is_empty()
    }

    /// Render as a comma-joined row in export column order
    pub fn to_row(&self) -> String {
        [
            self.name.as_str(),
            &self.modality,
            &self.num_samples,
            &self.size,
            &self.task,
            &self.annotation,
            &self.license,
            &self.download_url,
            &self.description,
        ]
        .join(",")
    }
}

/// A medical-imaging dataset entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalDataset {
    pub id: String,
    pub name: String,

    /// Release year, 0 when unknown
    pub year: i32,

    /// "2D", "3D" or "Video"
    pub dimension: String,

    pub modality: String,

    /// Organ or structure; may name several ("Bowel; Stomach")
    pub organ: String,

    pub num_samples: String,

    /// Short task code: "Seg", "Cls", "Det", "NA"
    pub task: String,

    /// Homepage link, may be empty
    pub link: String,
}

impl MedicalDataset {
    /// Create an entry with only a name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year: 0,
            dimension: String::new(),
            modality: String::new(),
            organ: String::new(),
            num_samples: String::new(),
            task: String::new(),
            link: String::new(),
        }
    }

    /// Year for display; unknown years render empty
    pub fn year_label(&self) -> String {
        if self.year == 0 {
            String::new()
        } else {
            self.year.to_string()
        }
    }

    /// Whether a homepage link is available
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }

    /// Render as a comma-joined row in source column order
    pub fn to_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.name,
            self.year,
            self.dimension,
            self.modality,
            self.organ,
            self.num_samples,
            self.task,
            self.link
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medical_to_row() {
        let mut dataset = MedicalDataset::new("2", "JSRT");
        dataset.year = 2000;
        dataset.dimension = "2D".to_string();
        dataset.modality = "X-Ray".to_string();
        dataset.organ = "Lung".to_string();
        dataset.num_samples = "247".to_string();
        dataset.task = "Cls".to_string();
        dataset.link = "http://db.jsrt.or.jp/eng.php".to_string();

        assert_eq!(
            dataset.to_row(),
            "JSRT,2000,2D,X-Ray,Lung,247,Cls,http://db.jsrt.or.jp/eng.php"
        );
    }

    #[test]
    fn test_general_to_row_placeholders() {
        let dataset = GeneralDataset::new("1", "COCO");
        assert_eq!(dataset.to_row(), "COCO,,,-,,-,-,,");
        assert!(!dataset.has_link());
    }

    #[test]
    fn test_year_label() {
        let mut dataset = MedicalDataset::new("1", "X");
        assert_eq!(dataset.year_label(), "");
        dataset.year = 2019;
        assert_eq!(dataset.year_label(), "2019");
    }
}
