pub mod advisory;
pub mod catalog;
pub mod commentary;
pub mod comparison;
pub mod config;
pub mod keywords;
pub mod lenient;
pub mod logging;
pub mod matching;
pub mod radar;
pub mod survey;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use keywords::{KeywordsByYear, YearRange};

/// Raw metric fields shared by journal-year rows and author survey answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MetricField {
    Disruption,
    Novelty,
    Interdisciplinary,
    ThemeConcentration,
    TopicDiversity,
    HotResponse,
}

/// Raw metrics of one journal-year row or one author survey.
///
/// Every field is conceptually on 0..=100. Missing or non-numeric values are
/// kept as `None` and read back as 0.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    #[serde(default, deserialize_with = "lenient::f64_or_none")]
    pub disruption: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_none")]
    pub novelty: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_none")]
    pub interdisciplinary: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_none")]
    pub theme_concentration: Option<f64>,
    #[serde(
        rename = "topic",
        alias = "topic_diversity",
        default,
        deserialize_with = "lenient::f64_or_none"
    )]
    pub topic_diversity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_or_none")]
    pub hot_response: Option<f64>,
}

impl MetricSet {
    /// Value of `field`, with missing and non-finite values read as 0.0.
    pub fn get(&self, field: MetricField) -> f64 {
        let raw = match field {
            MetricField::Disruption => self.disruption,
            MetricField::Novelty => self.novelty,
            MetricField::Interdisciplinary => self.interdisciplinary,
            MetricField::ThemeConcentration => self.theme_concentration,
            MetricField::TopicDiversity => self.topic_diversity,
            MetricField::HotResponse => self.hot_response,
        };
        raw.filter(|v| v.is_finite()).unwrap_or(0.0)
    }
}

/// One journal-year row as supplied by the metrics repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalRow {
    #[serde(default)]
    pub journal: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_or_none")]
    pub paper_count: Option<f64>,
    #[serde(flatten)]
    pub metrics: MetricSet,
    /// Raw keyword encodings keyed by year, exactly as stored upstream.
    #[serde(default, deserialize_with = "lenient::raw_keyword_map")]
    pub top_keywords: BTreeMap<i32, String>,
}

impl JournalRow {
    /// Blank identities are never scored or listed.
    pub fn has_identity(&self) -> bool {
        !self.journal.trim().is_empty()
    }

    pub fn keywords_by_year(&self, range: YearRange) -> KeywordsByYear {
        KeywordsByYear::from_raw(
            range,
            self.top_keywords
                .iter()
                .map(|(year, raw)| (*year, raw.as_str())),
        )
    }
}
