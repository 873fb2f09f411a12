use std::fmt;

use serde::Serialize;

use crate::radar::{DIMENSION_COUNT, RadarDimension, RadarProfile};

/// Values closer than this are reported as roughly equal.
pub const EQUAL_EPSILON: f64 = 0.01;

/// Per-dimension diagnostic between two profiles (author vs journal, or two journals).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionDiff {
    pub dimension: RadarDimension,
    pub label: &'static str,
    pub left: f64,
    pub right: f64,
    pub gap: f64,
    pub match_pct: u8,
}

impl DimensionDiff {
    pub fn new(dimension: RadarDimension, left: f64, right: f64) -> Self {
        let gap = (left - right).abs();
        let closeness = (1.0 - gap / dimension.range()) * 100.0;
        let match_pct = if closeness.is_finite() {
            closeness.round().clamp(0.0, 100.0) as u8
        } else {
            0
        };
        Self {
            dimension,
            label: dimension.label(),
            left,
            right,
            gap,
            match_pct,
        }
    }
}

pub fn dimension_diffs(
    left: &RadarProfile,
    right: &RadarProfile,
) -> [DimensionDiff; DIMENSION_COUNT] {
    RadarDimension::ALL.map(|d| DimensionDiff::new(d, left.get(d), right.get(d)))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonLine {
    RoughlyEqual {
        dimension: RadarDimension,
        value: f64,
    },
    Higher {
        dimension: RadarDimension,
        winner: String,
        diff: f64,
    },
}

impl ComparisonLine {
    pub fn dimension(&self) -> RadarDimension {
        match self {
            ComparisonLine::RoughlyEqual { dimension, .. }
            | ComparisonLine::Higher { dimension, .. } => *dimension,
        }
    }
}

impl fmt::Display for ComparisonLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonLine::RoughlyEqual { dimension, value } => {
                write!(f, "{}: both roughly equal ({value:.2}).", dimension.label())
            }
            ComparisonLine::Higher {
                dimension,
                winner,
                diff,
            } => write!(
                f,
                "{}: {winner} is higher (difference {diff:.2}).",
                dimension.label()
            ),
        }
    }
}

/// One line per dimension, in dimension order.
pub fn compare_profiles(
    name_a: &str,
    a: &RadarProfile,
    name_b: &str,
    b: &RadarProfile,
) -> Vec<ComparisonLine> {
    RadarDimension::ALL
        .iter()
        .map(|&dimension| {
            let (va, vb) = (a.get(dimension), b.get(dimension));
            let diff = (va - vb).abs();
            if diff < EQUAL_EPSILON {
                ComparisonLine::RoughlyEqual {
                    dimension,
                    value: va,
                }
            } else {
                let winner = if vb > va { name_b } else { name_a };
                ComparisonLine::Higher {
                    dimension,
                    winner: winner.to_string(),
                    diff,
                }
            }
        })
        .collect()
}
