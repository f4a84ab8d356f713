//! Projection of raw rows into typed catalog records.

use serde::{Deserialize, Serialize};

use super::RawRecord;
use crate::models::{GeneralDataset, MedicalDataset, PLACEHOLDER};

/// Language of the header row in catalog files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLocale {
    #[default]
    Zh,
    En,
}

/// Header labels used to look up each typed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub name: &'static str,
    pub year: &'static str,
    pub dimension: &'static str,
    pub modality: &'static str,
    pub organ: &'static str,
    pub samples: &'static str,
    pub task: &'static str,
    pub link: &'static str,
}

impl FieldNames {
    /// Labels used by the published catalog files
    pub const ZH: FieldNames = FieldNames {
        name: "名称",
        year: "年份",
        dimension: "维度",
        modality: "模态",
        organ: "器官/结构",
        samples: "图像数量",
        task: "任务类型",
        link: "链接",
    };

    pub const EN: FieldNames = FieldNames {
        name: "name",
        year: "year",
        dimension: "dimension",
        modality: "modality",
        organ: "organ",
        samples: "samples",
        task: "task",
        link: "link",
    };

    pub fn for_locale(locale: HeaderLocale) -> &'static FieldNames {
        match locale {
            HeaderLocale::Zh => &Self::ZH,
            HeaderLocale::En => &Self::EN,
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self::ZH
    }
}

/// Lenient integer parse.
///
/// Leading whitespace and an optional sign are accepted, then as many ASCII
/// digits as follow; trailing text is ignored. Input with no leading digits,
/// or a value outside `i32`, yields 0.
pub fn lenient_int(raw: &str) -> i32 {
    let s = raw.trim_start();
    let sign = usize::from(matches!(s.as_bytes().first(), Some(b'-' | b'+')));
    let digits = &s[sign..];

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    // i32::MIN has no positive counterpart, so keep the sign on the slice
    s[..sign + end]
        .parse::<i64>()
        .ok()
        .and_then(|value| i32::try_from(value).ok())
        .unwrap_or(0)
}

/// A typed record that can be built from a raw row
pub trait FromRawRecord: Sized {
    fn from_raw(raw: &RawRecord, names: &FieldNames) -> Self;

    /// Identifying field; records where it is blank are dropped
    fn name(&self) -> &str;
}

impl FromRawRecord for GeneralDataset {
    fn from_raw(raw: &RawRecord, names: &FieldNames) -> Self {
        Self {
            id: raw.line.to_string(),
            name: raw.get(names.name).to_string(),
            modality: raw.get(names.modality).to_string(),
            num_samples: raw.get(names.samples).to_string(),
            size: PLACEHOLDER.to_string(),
            task: raw.get(names.task).to_string(),
            annotation: PLACEHOLDER.to_string(),
            license: PLACEHOLDER.to_string(),
            download_url: raw.get(names.link).to_string(),
            description: format!("{} - {}", raw.get(names.organ), raw.get(names.dimension)),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FromRawRecord for MedicalDataset {
    fn from_raw(raw: &RawRecord, names: &FieldNames) -> Self {
        Self {
            id: raw.line.to_string(),
            name: raw.get(names.name).to_string(),
            year: lenient_int(raw.get(names.year)),
            dimension: raw.get(names.dimension).to_string(),
            modality: raw.get(names.modality).to_string(),
            organ: raw.get(names.organ).to_string(),
            num_samples: raw.get(names.samples).to_string(),
            task: raw.get(names.task).to_string(),
            link: raw.get(names.link).to_string(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Project raw rows into typed records, preserving row order and
/// dropping rows whose name is blank.
pub fn project<T: FromRawRecord>(rows: &[RawRecord], names: &FieldNames) -> Vec<T> {
    let records: Vec<T> = rows
        .iter()
        .map(|raw| T::from_raw(raw, names))
        .filter(|record| !record.name().trim().is_empty())
        .collect();

    let dropped = rows.len() - records.len();
    if dropped > 0 {
        tracing::debug!(dropped, "Dropped rows without a name");
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_delimited;

    #[test]
    fn test_lenient_int() {
        assert_eq!(lenient_int("2019"), 2019);
        assert_eq!(lenient_int("  2019  "), 2019);
        assert_eq!(lenient_int("2019a"), 2019);
        assert_eq!(lenient_int("-12"), -12);
        assert_eq!(lenient_int("+7"), 7);
        assert_eq!(lenient_int(""), 0);
        assert_eq!(lenient_int("unknown"), 0);
        assert_eq!(lenient_int("-"), 0);
        assert_eq!(lenient_int("99999999999"), 0);
    }

    #[test]
    fn test_lenient_int_bounds() {
        assert_eq!(lenient_int("-2147483648"), i32::MIN);
        assert_eq!(lenient_int("2147483647"), i32::MAX);
        assert_eq!(lenient_int("2147483648"), 0);
        assert_eq!(lenient_int("-2147483649"), 0);
        assert_eq!(lenient_int("99999999999999999999999"), 0);
    }

    #[test]
    fn test_missing_year_projects_to_zero() {
        let rows = parse_delimited("name,year\nFoo");
        assert_eq!(rows[0].get("year"), "");

        let records: Vec<MedicalDataset> = project(&rows, &FieldNames::EN);
        assert_eq!(records[0].name, "Foo");
        assert_eq!(records[0].year, 0);
    }

    #[test]
    fn test_blank_name_excluded() {
        let rows = parse_delimited("name,modality,task\n,CT,Seg\nLiTS,CT,Seg\n");
        let records: Vec<MedicalDataset> = project(&rows, &FieldNames::EN);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "LiTS");
        assert_eq!(records[0].id, "2");
    }

    #[test]
    fn test_medical_projection_zh_headers() {
        let text = "名称,年份,维度,模态,器官/结构,图像数量,任务类型,链接\n\
                    JSRT,2000,2D,X-Ray,Lung,247,Cls,http://db.jsrt.or.jp/eng.php\n";
        let records: Vec<MedicalDataset> = project(&parse_delimited(text), &FieldNames::ZH);

        let jsrt = &records[0];
        assert_eq!(jsrt.id, "1");
        assert_eq!(jsrt.year, 2000);
        assert_eq!(jsrt.dimension, "2D");
        assert_eq!(jsrt.modality, "X-Ray");
        assert_eq!(jsrt.organ, "Lung");
        assert_eq!(jsrt.num_samples, "247");
        assert_eq!(jsrt.task, "Cls");
        assert_eq!(jsrt.link, "http://db.jsrt.or.jp/eng.php");
    }

    #[test]
    fn test_general_projection_placeholders_and_description() {
        let text = "名称,模态,维度,器官/结构,图像数量,任务类型,链接\n\
                    COCO,RGB Image,2D,Common Objects,330K,Detection,https://cocodataset.org/\n";
        let records: Vec<GeneralDataset> = project(&parse_delimited(text), &FieldNames::ZH);

        let coco = &records[0];
        assert_eq!(coco.size, "-");
        assert_eq!(coco.annotation, "-");
        assert_eq!(coco.license, "-");
        assert_eq!(coco.description, "Common Objects - 2D");
        assert_eq!(coco.download_url, "https://cocodataset.org/");
    }

    #[test]
    fn test_wrong_locale_drops_everything() {
        let rows = parse_delimited("name\nFoo\n");
        let records: Vec<GeneralDataset> = project(&rows, &FieldNames::ZH);
        assert!(records.is_empty());
    }
}
