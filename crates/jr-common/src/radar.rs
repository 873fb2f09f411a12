use serde::Serialize;
use strum::{AsRefStr, EnumCount, EnumIter};

use crate::{MetricField, MetricSet};

pub const DIMENSION_COUNT: usize = 5;

/// Upper bound of the radar chart axes (the frontier dimension sums two metrics).
pub const CHART_MAX: f64 = 200.0;

/// Radar dimensions in their fixed order. Every array indexed by dimension
/// (profile values, similarity ranges, diffs) follows this order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    EnumIter,
    EnumCount,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RadarDimension {
    Frontier,
    Openness,
    Concentration,
    Diversity,
    HotResponse,
}

const _: () = assert!(RadarDimension::COUNT == DIMENSION_COUNT);

impl RadarDimension {
    pub const ALL: [RadarDimension; DIMENSION_COUNT] = [
        RadarDimension::Frontier,
        RadarDimension::Openness,
        RadarDimension::Concentration,
        RadarDimension::Diversity,
        RadarDimension::HotResponse,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Width of the value range of this dimension.
    pub const fn range(self) -> f64 {
        match self {
            RadarDimension::Frontier => 200.0,
            _ => 100.0,
        }
    }

    /// Human readable axis label.
    pub const fn label(self) -> &'static str {
        match self {
            RadarDimension::Frontier => "Content frontier",
            RadarDimension::Openness => "Disciplinary openness",
            RadarDimension::Concentration => "Theme concentration",
            RadarDimension::Diversity => "Topic diversity",
            RadarDimension::HotResponse => "Hot-topic response",
        }
    }
}

/// Per-dimension ranges, `[200, 100, 100, 100, 100]`.
pub const DIMENSION_RANGES: [f64; DIMENSION_COUNT] = {
    let mut ranges = [0.0; DIMENSION_COUNT];
    let mut i = 0;
    while i < DIMENSION_COUNT {
        ranges[i] = RadarDimension::ALL[i].range();
        i += 1;
    }
    ranges
};

/// Five-dimension content profile of a journal or an author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RadarProfile {
    frontier: f64,
    openness: f64,
    concentration: f64,
    diversity: f64,
    hot_response: f64,
}

impl RadarProfile {
    /// Builds the profile from raw metrics. Missing values contribute 0.0;
    /// nothing is clamped, so `frontier` may legitimately reach 200.
    pub fn build(metrics: &MetricSet) -> Self {
        Self {
            frontier: metrics.get(MetricField::Disruption) + metrics.get(MetricField::Novelty),
            openness: metrics.get(MetricField::Interdisciplinary),
            concentration: metrics.get(MetricField::ThemeConcentration),
            diversity: metrics.get(MetricField::TopicDiversity),
            hot_response: metrics.get(MetricField::HotResponse),
        }
    }

    pub fn from_array(values: [f64; DIMENSION_COUNT]) -> Self {
        let [frontier, openness, concentration, diversity, hot_response] =
            values.map(|v| if v.is_finite() { v } else { 0.0 });
        Self {
            frontier,
            openness,
            concentration,
            diversity,
            hot_response,
        }
    }

    /// `None` unless exactly [`DIMENSION_COUNT`] values are given.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let array: [f64; DIMENSION_COUNT] = values.try_into().ok()?;
        Some(Self::from_array(array))
    }

    pub fn values(&self) -> [f64; DIMENSION_COUNT] {
        [
            self.frontier,
            self.openness,
            self.concentration,
            self.diversity,
            self.hot_response,
        ]
    }

    pub fn get(&self, dimension: RadarDimension) -> f64 {
        self.values()[dimension.index()]
    }

    pub fn frontier(&self) -> f64 {
        self.frontier
    }

    pub fn openness(&self) -> f64 {
        self.openness
    }

    pub fn concentration(&self) -> f64 {
        self.concentration
    }

    pub fn diversity(&self) -> f64 {
        self.diversity
    }

    pub fn hot_response(&self) -> f64 {
        self.hot_response
    }

    pub fn chart(&self) -> RadarChart {
        RadarChart {
            labels: RadarDimension::ALL.map(RadarDimension::label),
            values: self.values(),
            max: CHART_MAX,
        }
    }
}

impl From<&MetricSet> for RadarProfile {
    fn from(metrics: &MetricSet) -> Self {
        Self::build(metrics)
    }
}

/// Chart-ready view consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub labels: [&'static str; DIMENSION_COUNT],
    pub values: [f64; DIMENSION_COUNT],
    pub max: f64,
}
