//! Display language and the handful of localized status strings the store surfaces.

use serde::{Deserialize, Serialize};

/// Display language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Zh,
}

impl Language {
    /// Language code ("en", "zh")
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Shown while catalogs are being fetched
    pub fn loading(&self) -> &'static str {
        match self {
            Language::En => "Loading data...",
            Language::Zh => "加载数据中...",
        }
    }

    /// Shown when a catalog load failed
    pub fn load_failed(&self) -> &'static str {
        match self {
            Language::En => "Failed to load data",
            Language::Zh => "加载数据失败",
        }
    }

    /// Shown when filters produce an empty result
    pub fn no_results(&self) -> &'static str {
        match self {
            Language::En => "No matching results",
            Language::Zh => "没有匹配的结果",
        }
    }

    /// Label for an unconstrained facet
    pub fn all_label(&self) -> &'static str {
        match self {
            Language::En => "All",
            Language::Zh => "全部",
        }
    }

    /// Tab label for the general dataset catalog
    pub fn general_label(&self) -> &'static str {
        match self {
            Language::En => "General Datasets",
            Language::Zh => "通用数据集",
        }
    }

    /// Tab label for the medical dataset catalog
    pub fn medical_label(&self) -> &'static str {
        match self {
            Language::En => "Medical Datasets",
            Language::Zh => "医学数据集",
        }
    }

    /// Pager summary, e.g. "Showing 11 - 20 of 42"
    pub fn showing(&self, start: usize, end: usize, total: usize) -> String {
        match self {
            Language::En => format!("Showing {} - {} of {}", start, end, total),
            Language::Zh => format!("显示第 {} - {} 条，共 {} 条", start, end, total),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "zh" | "chinese" | "中文" => Ok(Language::Zh),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}
