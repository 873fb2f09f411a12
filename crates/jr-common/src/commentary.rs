//! Rule-based qualitative commentary.
//!
//! Each label looks at two raw metrics, splits each at [`HIGH_THRESHOLD`], and
//! picks one of four fixed templates. No scoring, no state.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::{MetricField, MetricSet};

/// A metric value is "high" at or above this threshold.
pub const HIGH_THRESHOLD: f64 = 50.0;

pub fn is_high(value: f64) -> bool {
    value >= HIGH_THRESHOLD
}

/// Templates for the four high/low combinations of a metric pair (A, B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantTemplates<'a> {
    pub hh: &'a str,
    pub hl: &'a str,
    pub lh: &'a str,
    pub ll: &'a str,
}

/// `hh` when both are high, `hl` when only A is, `lh` when only B is, else `ll`.
pub fn classify<'a>(value_a: f64, value_b: f64, templates: &QuadrantTemplates<'a>) -> &'a str {
    match (is_high(value_a), is_high(value_b)) {
        (true, true) => templates.hh,
        (true, false) => templates.hl,
        (false, true) => templates.lh,
        (false, false) => templates.ll,
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, EnumIter, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommentaryLabel {
    Frontier,
    Openness,
    ThematicProfile,
    Responsiveness,
}

impl CommentaryLabel {
    pub fn title(self) -> &'static str {
        match self {
            CommentaryLabel::Frontier => "frontier",
            CommentaryLabel::Openness => "openness",
            CommentaryLabel::ThematicProfile => "thematic profile",
            CommentaryLabel::Responsiveness => "responsiveness",
        }
    }

    /// Metric pair (A, B) classified for this label.
    pub fn inputs(self) -> (MetricField, MetricField) {
        match self {
            CommentaryLabel::Frontier => (MetricField::Novelty, MetricField::Disruption),
            CommentaryLabel::Openness => {
                (MetricField::Interdisciplinary, MetricField::TopicDiversity)
            }
            CommentaryLabel::ThematicProfile => {
                (MetricField::ThemeConcentration, MetricField::TopicDiversity)
            }
            CommentaryLabel::Responsiveness => (MetricField::HotResponse, MetricField::Disruption),
        }
    }

    pub fn templates(self) -> &'static QuadrantTemplates<'static> {
        match self {
            CommentaryLabel::Frontier => &FRONTIER,
            CommentaryLabel::Openness => &OPENNESS,
            CommentaryLabel::ThematicProfile => &THEMATIC_PROFILE,
            CommentaryLabel::Responsiveness => &RESPONSIVENESS,
        }
    }

    pub fn comment(self, metrics: &MetricSet) -> &'static str {
        let (a, b) = self.inputs();
        classify(metrics.get(a), metrics.get(b), self.templates())
    }
}

// novelty × disruption
const FRONTIER: QuadrantTemplates<'static> = QuadrantTemplates {
    hh: "Trend setter: publishes the newest and most breakthrough-oriented research.",
    hl: "Fast follower: tracks emerging topics closely; work is current but rarely paradigm-shifting.",
    lh: "Quiet disruptor: does not chase surface trends, yet its papers can overturn settled views in classic fields (uncommon).",
    ll: "Classic consolidator: strengthens foundations, validating and refining existing theory.",
};

// interdisciplinarity × topic diversity
const OPENNESS: QuadrantTemplates<'static> = QuadrantTemplates {
    hh: "Open hub: cross-disciplinary collaboration and broad topical coverage; a general exchange venue.",
    hl: "Focused crossover: open in methods and disciplines, but concentrated on a clear cross-field storyline.",
    lh: "Broad specialist: stays within its discipline while spanning many of its sub-areas.",
    ll: "Narrow deep-diver: tight disciplinary and topical boundaries; iterates on core questions.",
};

// theme concentration × topic diversity
const THEMATIC_PROFILE: QuadrantTemplates<'static> = QuadrantTemplates {
    hh: "Multi-core cluster: several strong topic clusters with reasonable breadth between them.",
    hl: "Topic-focused: a very concentrated scope, deep in one or two sub-fields.",
    lh: "Broad field: covers many sub-directions with a dispersed topic distribution.",
    ll: "Fragmented explorer: neither a dominant thread nor broad coverage; scattered, transitional topics.",
};

// hot-topic response × disruption
const RESPONSIVENESS: QuadrantTemplates<'static> = QuadrantTemplates {
    hh: "Hot-topic igniter: picks up trends fast and is likely to turn them into disruptive results.",
    hl: "Hot-topic tracker: reacts quickly to popular directions, mostly with incremental or applied work.",
    lh: "Contrarian innovator: not driven by trending keywords, yet prone to rewriting traditional topics.",
    ll: "Steady evolver: stable core keywords and mild disruption; the field advances incrementally.",
};

/// Label → text mapping for one metric record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Commentary(BTreeMap<CommentaryLabel, &'static str>);

impl Commentary {
    pub fn get(&self, label: CommentaryLabel) -> Option<&'static str> {
        self.0.get(&label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommentaryLabel, &'static str)> + '_ {
        self.0.iter().map(|(label, text)| (*label, *text))
    }
}

pub fn build_commentary(metrics: &MetricSet) -> Commentary {
    Commentary(
        CommentaryLabel::iter()
            .map(|label| (label, label.comment(metrics)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: QuadrantTemplates<'static> = QuadrantTemplates {
        hh: "hh",
        hl: "hl",
        lh: "lh",
        ll: "ll",
    };

    #[test]
    fn threshold_is_inclusive() {
        assert!(is_high(50.0));
        assert!(!is_high(49.999));
    }

    #[test]
    fn picks_each_quadrant() {
        assert_eq!(classify(50.0, 50.0, &T), "hh");
        assert_eq!(classify(80.0, 10.0, &T), "hl");
        assert_eq!(classify(10.0, 80.0, &T), "lh");
        assert_eq!(classify(0.0, 0.0, &T), "ll");
    }

    #[test]
    fn builds_all_four_labels() {
        let commentary = build_commentary(&MetricSet::default());
        assert_eq!(commentary.iter().count(), 4);
        for (label, text) in commentary.iter() {
            assert_eq!(text, label.templates().ll);
        }
    }

    #[test]
    fn uses_fixed_metric_pairs() {
        let metrics = MetricSet {
            novelty: Some(70.0),
            disruption: Some(20.0),
            interdisciplinary: Some(10.0),
            topic_diversity: Some(90.0),
            theme_concentration: Some(60.0),
            hot_response: Some(55.0),
        };

        let commentary = build_commentary(&metrics);

        assert_eq!(commentary.get(CommentaryLabel::Frontier), Some(FRONTIER.hl));
        assert_eq!(commentary.get(CommentaryLabel::Openness), Some(OPENNESS.lh));
        assert_eq!(
            commentary.get(CommentaryLabel::ThematicProfile),
            Some(THEMATIC_PROFILE.hh)
        );
        assert_eq!(
            commentary.get(CommentaryLabel::Responsiveness),
            Some(RESPONSIVENESS.hl)
        );
    }

    #[test]
    fn missing_metrics_count_as_low() {
        let metrics = MetricSet {
            novelty: Some(50.0),
            ..MetricSet::default()
        };
        assert_eq!(CommentaryLabel::Frontier.comment(&metrics), FRONTIER.hl);
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let json = serde_json::to_value(build_commentary(&MetricSet::default())).unwrap();
        assert!(json.get("thematic_profile").is_some());
        assert!(json.get("responsiveness").is_some());
    }
}
