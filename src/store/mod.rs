//! Session state for the fetched dataset catalogs.
//!
//! A [`CatalogStore`] owns one [`Catalog`] per dataset kind and the status of
//! the last load. Loading fetches both files concurrently, then ingests and
//! projects each one. Fetch errors never escape [`CatalogStore::load`]: they
//! end up in [`LoadStatus::Failed`] and the affected catalogs are left empty.
//!
//! ```
//! use research_bank::sources::MockSource;
//! use research_bank::store::{CatalogStore, LoadStatus};
//!
//! # tokio_test_block(async {
//! let source = MockSource::new()
//!     .with_file("general_datasets.csv", "名称,模态\nCOCO,RGB Image\n")
//!     .with_file("medical_datasets.csv", "名称,年份\nLiTS,2017\n");
//!
//! let mut store = CatalogStore::default();
//! assert_eq!(store.load(&source).await, &LoadStatus::Loaded);
//! assert_eq!(store.medical()[0].year, 2017);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use crate::ingest::{parse_delimited, project, FieldNames, FromRawRecord, HeaderLocale};
use crate::models::{GeneralDataset, Language, MedicalDataset};
use crate::sources::{CatalogError, CatalogSource};

/// An immutable, ordered snapshot of one record type.
///
/// Clones share the same records. A reload installs a new snapshot rather
/// than mutating this one, so a clone taken before the reload keeps reading
/// the old records.
#[derive(Debug)]
pub struct Catalog<T> {
    records: Arc<[T]>,
}

impl<T> Catalog<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Clone for Catalog<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for Catalog<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.records
    }
}

impl<T> From<Vec<T>> for Catalog<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

/// Which fetched catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    General,
    Medical,
}

impl CatalogKind {
    pub fn label(&self, language: Language) -> &'static str {
        match self {
            CatalogKind::General => language.general_label(),
            CatalogKind::Medical => language.medical_label(),
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::General => write!(f, "general"),
            CatalogKind::Medical => write!(f, "medical"),
        }
    }
}

/// How a failed fetch affects the other catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Both catalogs load or neither does
    #[default]
    Joint,
    /// A catalog that fetched fine is kept even if the other failed
    Independent,
}

/// A catalog that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub kind: CatalogKind,
    pub message: String,
}

impl LoadFailure {
    /// Localized one-line notice naming the catalog, e.g. "医学数据集: 加载数据失败"
    pub fn notice(&self, language: Language) -> String {
        format!("{}: {}", self.kind.label(language), language.load_failed())
    }
}

/// Outcome of the most recent load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "failures", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loaded,
    Failed(Vec<LoadFailure>),
}

impl LoadStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadStatus::Loaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }

    /// User-facing message for this status, if there is one to show
    pub fn message(&self, language: Language) -> Option<&'static str> {
        match self {
            LoadStatus::NotLoaded => Some(language.loading()),
            LoadStatus::Loaded => None,
            LoadStatus::Failed(_) => Some(language.load_failed()),
        }
    }
}

/// File names and parsing options for a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub general_file: String,
    pub medical_file: String,
    pub header_locale: HeaderLocale,
    pub failure_policy: FailurePolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            general_file: "general_datasets.csv".to_string(),
            medical_file: "medical_datasets.csv".to_string(),
            header_locale: HeaderLocale::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// The general and medical catalogs plus their load status
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    options: StoreOptions,
    general: Catalog<GeneralDataset>,
    medical: Catalog<MedicalDataset>,
    status: LoadStatus,
}

impl CatalogStore {
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn general(&self) -> &Catalog<GeneralDataset> {
        &self.general
    }

    pub fn medical(&self) -> &Catalog<MedicalDataset> {
        &self.medical
    }

    /// Fetch both catalogs from `source` and replace the current ones.
    ///
    /// The two fetches run concurrently. Under [`FailurePolicy::Joint`] any
    /// failure leaves both catalogs empty; under
    /// [`FailurePolicy::Independent`] only the failed one is emptied. Either
    /// way every failure is listed in the returned status.
    pub async fn load(&mut self, source: &dyn CatalogSource) -> &LoadStatus {
        tracing::info!(
            source = source.id(),
            location = %source.location(),
            "Loading catalogs"
        );

        let (general_text, medical_text) = tokio::join!(
            source.fetch(&self.options.general_file),
            source.fetch(&self.options.medical_file)
        );

        let names = FieldNames::for_locale(self.options.header_locale);
        let general = ingest::<GeneralDataset>(CatalogKind::General, general_text, names);
        let medical = ingest::<MedicalDataset>(CatalogKind::Medical, medical_text, names);

        let mut failures = Vec::new();
        let (general, medical) = match (general, medical) {
            (Ok(general), Ok(medical)) => (general, medical),
            (general, medical) => {
                let general = general.map_err(|f| failures.push(f)).ok();
                let medical = medical.map_err(|f| failures.push(f)).ok();
                match self.options.failure_policy {
                    FailurePolicy::Joint => (Vec::new(), Vec::new()),
                    FailurePolicy::Independent => {
                        (general.unwrap_or_default(), medical.unwrap_or_default())
                    }
                }
            }
        };

        self.general = Catalog::new(general);
        self.medical = Catalog::new(medical);
        self.status = if failures.is_empty() {
            tracing::info!(
                general = self.general.len(),
                medical = self.medical.len(),
                "Catalogs loaded"
            );
            LoadStatus::Loaded
        } else {
            LoadStatus::Failed(failures)
        };

        &self.status
    }
}

fn ingest<T: FromRawRecord>(
    kind: CatalogKind,
    fetched: Result<String, CatalogError>,
    names: &FieldNames,
) -> Result<Vec<T>, LoadFailure> {
    match fetched {
        Ok(text) => {
            let rows = parse_delimited(&text);
            let records = project::<T>(&rows, names);
            tracing::debug!(%kind, rows = rows.len(), records = records.len(), "Ingested catalog");
            Ok(records)
        }
        Err(e) => {
            tracing::warn!(%kind, error = %e, "Failed to fetch catalog");
            Err(LoadFailure {
                kind,
                message: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSource;

    const GENERAL: &str = "名称,模态,维度,器官/结构,图像数量,任务类型,链接\n\
        COCO,RGB Image,2D,Objects,330K,Det,https://cocodataset.org\n\
        ,RGB Image,2D,,,Det,\n\
        ImageNet,RGB Image,2D,Objects,14M,Cls,\n";

    const MEDICAL: &str = "名称,年份,维度,模态,器官/结构,图像数量,任务类型,链接\n\
        LiTS,2017,3D,CT,Liver,131,Seg,\n\
        BraTS,unknown,3D,MR,Brain,,Seg,\n";

    fn source() -> MockSource {
        MockSource::new()
            .with_file("general_datasets.csv", GENERAL)
            .with_file("medical_datasets.csv", MEDICAL)
    }

    #[tokio::test]
    async fn test_load_success() {
        let mut store = CatalogStore::default();
        assert_eq!(store.status(), &LoadStatus::NotLoaded);

        let status = store.load(&source()).await;
        assert!(status.is_loaded());

        // Blank-name row dropped; ids keep the line offset
        let ids: Vec<&str> = store.general().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(store.general()[0].description, "Objects - 2D");

        assert_eq!(store.medical().len(), 2);
        assert_eq!(store.medical()[1].year, 0);
    }

    #[tokio::test]
    async fn test_joint_failure_empties_both() {
        let source = MockSource::new()
            .with_file("general_datasets.csv", GENERAL)
            .with_failure("medical_datasets.csv", "connection reset");

        let mut store = CatalogStore::default();
        let status = store.load(&source).await.clone();

        match status {
            LoadStatus::Failed(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].kind, CatalogKind::Medical);
                assert!(failures[0].message.contains("connection reset"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(store.general().is_empty());
        assert!(store.medical().is_empty());
    }

    #[tokio::test]
    async fn test_independent_failure_keeps_other_catalog() {
        let source = MockSource::new().with_file("general_datasets.csv", GENERAL);
        let mut store = CatalogStore::new(StoreOptions {
            failure_policy: FailurePolicy::Independent,
            ..StoreOptions::default()
        });

        assert!(store.load(&source).await.is_failed());
        assert_eq!(store.general().len(), 2);
        assert!(store.medical().is_empty());
    }

    #[tokio::test]
    async fn test_both_failures_reported() {
        let mut store = CatalogStore::default();
        let status = store.load(&MockSource::new()).await;

        let LoadStatus::Failed(failures) = status else {
            panic!("expected failure");
        };
        let kinds: Vec<CatalogKind> = failures.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![CatalogKind::General, CatalogKind::Medical]);
    }

    #[tokio::test]
    async fn test_reload_replaces_catalogs() {
        let mut store = CatalogStore::default();
        store.load(&source()).await;
        let before = store.medical().clone();

        let updated = MockSource::new()
            .with_file("general_datasets.csv", GENERAL)
            .with_file("medical_datasets.csv", "名称,年份\nKiTS,2019\n");
        store.load(&updated).await;

        assert_eq!(store.medical().len(), 1);
        assert_eq!(store.medical()[0].name, "KiTS");
        // Snapshot taken before the reload is untouched
        assert_eq!(before.len(), 2);
    }

    #[tokio::test]
    async fn test_reload_after_failure_recovers() {
        let mut store = CatalogStore::default();
        assert!(store.load(&MockSource::new()).await.is_failed());
        assert!(store.load(&source()).await.is_loaded());
        assert_eq!(store.medical().len(), 2);
    }

    #[tokio::test]
    async fn test_english_headers() {
        let source = MockSource::new()
            .with_file("general_datasets.csv", "name,modality\nCOCO,RGB Image\n")
            .with_file("medical_datasets.csv", "name,year\nLiTS,2017\n");
        let mut store = CatalogStore::new(StoreOptions {
            header_locale: HeaderLocale::En,
            ..StoreOptions::default()
        });

        assert!(store.load(&source).await.is_loaded());
        assert_eq!(store.general()[0].modality, "RGB Image");
        assert_eq!(store.medical()[0].year, 2017);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            LoadStatus::Failed(Vec::new()).message(Language::Zh),
            Some("加载数据失败")
        );
        assert_eq!(
            LoadStatus::Failed(Vec::new()).message(Language::En),
            Some("Failed to load data")
        );
        assert_eq!(LoadStatus::Loaded.message(Language::En), None);
    }

    #[tokio::test]
    async fn test_failure_notice_names_catalog() {
        let source = MockSource::new().with_file("general_datasets.csv", GENERAL);
        let mut store = CatalogStore::new(StoreOptions {
            failure_policy: FailurePolicy::Independent,
            ..StoreOptions::default()
        });

        let LoadStatus::Failed(failures) = store.load(&source).await else {
            panic!("expected failure");
        };
        assert_eq!(failures[0].kind.to_string(), "medical");
        assert_eq!(
            failures[0].notice(Language::En),
            format!("{}: Failed to load data", Language::En.medical_label())
        );
        assert_eq!(
            failures[0].notice(Language::Zh),
            format!("{}: 加载数据失败", Language::Zh.medical_label())
        );
    }
}
