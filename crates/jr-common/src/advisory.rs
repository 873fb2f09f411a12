//! Fact payloads handed to the external advisory text generator.
//!
//! These only collect facts. Calling the generator and rendering its answer
//! happen outside this crate.

use serde::Serialize;

use crate::commentary::{Commentary, build_commentary};
use crate::comparison::{DimensionDiff, dimension_diffs};
use crate::keywords::{
    KeywordSet, KeywordsByYear, YearRange, match_keywords, pick_keywords_for_year,
};
use crate::matching::{similarity, to_percent};
use crate::radar::{DIMENSION_COUNT, RadarChart, RadarProfile};
use crate::survey::SurveyResponse;
use crate::{JournalRow, MetricSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalMetricFacts {
    #[serde(flatten)]
    pub metrics: MetricSet,
    pub paper_count: Option<f64>,
    pub category: Option<String>,
}

impl JournalMetricFacts {
    fn from_row(row: &JournalRow) -> Self {
        Self {
            metrics: row.metrics,
            paper_count: row.paper_count,
            category: row.category.clone(),
        }
    }
}

/// Journal detail analysis input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalAnalysisPayload {
    pub journal: String,
    pub latest_year: Option<i32>,
    pub metrics: JournalMetricFacts,
    pub radar: RadarChart,
    pub rule_based_comments: Commentary,
    pub top_keywords_by_year: KeywordsByYear,
}

impl JournalAnalysisPayload {
    pub fn build(row: &JournalRow, range: YearRange) -> Self {
        Self {
            journal: row.journal.trim().to_string(),
            latest_year: row.year,
            metrics: JournalMetricFacts::from_row(row),
            radar: RadarProfile::build(&row.metrics).chart(),
            rule_based_comments: build_commentary(&row.metrics),
            top_keywords_by_year: row.keywords_by_year(range),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyFacts {
    pub keywords: Vec<String>,
    pub scores: MetricSet,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorProfileFacts {
    pub radar: RadarChart,
    pub rule_based_comments: Commentary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalFacts {
    pub name: String,
    pub latest_year: Option<i32>,
    pub metrics: JournalMetricFacts,
    pub radar: RadarChart,
    pub rule_based_comments: Commentary,
    pub top_keywords_by_year: KeywordsByYear,
    pub target_year: i32,
    pub target_year_keywords: KeywordSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchFacts {
    pub overall_match_pct: u8,
    pub matched_keywords: Vec<String>,
    pub dimension_diffs: [DimensionDiff; DIMENSION_COUNT],
}

/// Author–journal match analysis input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchAnalysisPayload {
    pub survey: SurveyFacts,
    pub author_profile: AuthorProfileFacts,
    pub journal: JournalFacts,
    #[serde(rename = "match")]
    pub match_facts: MatchFacts,
}

impl MatchAnalysisPayload {
    pub fn build(
        survey: &SurveyResponse,
        row: &JournalRow,
        target_year: i32,
        range: YearRange,
    ) -> Self {
        let author_profile = survey.radar_profile();
        let journal_profile = RadarProfile::build(&row.metrics);

        let keywords_by_year = row.keywords_by_year(range);
        let target_year_keywords = pick_keywords_for_year(&keywords_by_year, target_year);
        let matched_keywords = match_keywords(&survey.keyword_set(), &target_year_keywords);

        Self {
            survey: SurveyFacts {
                keywords: survey.keywords.clone(),
                scores: survey.scores,
                created_at: survey.created_at.clone(),
            },
            author_profile: AuthorProfileFacts {
                radar: author_profile.chart(),
                rule_based_comments: build_commentary(&survey.scores),
            },
            journal: JournalFacts {
                name: row.journal.trim().to_string(),
                latest_year: row.year,
                metrics: JournalMetricFacts::from_row(row),
                radar: journal_profile.chart(),
                rule_based_comments: build_commentary(&row.metrics),
                top_keywords_by_year: keywords_by_year,
                target_year,
                target_year_keywords,
            },
            match_facts: MatchFacts {
                overall_match_pct: to_percent(similarity(&author_profile, &journal_profile)),
                matched_keywords,
                dimension_diffs: dimension_diffs(&author_profile, &journal_profile),
            },
        }
    }
}
