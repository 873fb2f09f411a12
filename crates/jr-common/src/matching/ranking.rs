use serde::Serialize;

use super::{
    similarity::similarity,
    weights::{MAX_RECOMMENDATIONS, RECOMMENDATION_WEIGHTS, ScoreWeights},
};
use crate::{
    JournalRow, MetricSet,
    keywords::{KeywordSet, KeywordsByYear, YearRange, match_keywords},
    radar::RadarProfile,
};

/// One journal as seen by the ranker: latest metrics plus per-year keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalCandidate {
    pub journal_id: String,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub metrics: MetricSet,
    pub keywords_by_year: KeywordsByYear,
}

impl JournalCandidate {
    pub fn from_row(row: &JournalRow, range: YearRange) -> Self {
        Self {
            journal_id: row.journal.trim().to_string(),
            year: row.year,
            category: row.category.clone(),
            metrics: row.metrics,
            keywords_by_year: row.keywords_by_year(range),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationCandidate {
    pub journal_id: String,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub matched_keywords: Vec<String>,
    pub keyword_hit_count: usize,
    /// Rounded profile similarity, 0..=100.
    pub similarity_pct: u8,
    /// Weighted blend of keyword overlap and similarity, 0..=100.
    pub composite_score: f64,
}

/// Journals hit by one author keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHits {
    pub keyword: String,
    pub journals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingOutcome {
    pub target_year: i32,
    pub recommendations: Vec<RecommendationCandidate>,
    /// Computed over every scored journal, not just the shortlist.
    pub keyword_hits: Vec<KeywordHits>,
}

#[derive(Debug, Clone)]
pub struct RankingConfig {
    /// Year whose journal keywords are matched (with backward fallback).
    pub target_year: i32,
    pub max_results: usize,
    pub weights: ScoreWeights,
}

impl RankingConfig {
    pub fn for_year(target_year: i32) -> Self {
        Self {
            target_year,
            max_results: MAX_RECOMMENDATIONS,
            weights: RECOMMENDATION_WEIGHTS,
        }
    }
}

pub struct RecommendationRanker {
    config: RankingConfig,
}

impl RecommendationRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Ranked shortlist, best first. Identical inputs always give the same order.
    pub fn rank(
        &self,
        author_profile: &RadarProfile,
        author_keywords: &KeywordSet,
        candidates: &[JournalCandidate],
    ) -> Vec<RecommendationCandidate> {
        let mut ranked: Vec<_> = candidates
            .iter()
            .filter_map(|c| self.score_candidate(author_profile, author_keywords, c))
            .collect();

        sort_recommendations(&mut ranked);
        ranked.truncate(self.config.max_results);
        ranked
    }

    /// Shortlist plus per-keyword journal hits.
    pub fn rank_with_hits(
        &self,
        author_profile: &RadarProfile,
        author_keywords: &KeywordSet,
        candidates: &[JournalCandidate],
    ) -> RankingOutcome {
        let mut keyword_hits: Vec<KeywordHits> = Vec::new();
        for keyword in author_keywords {
            if keyword_hits.iter().any(|h| &h.keyword == keyword) {
                continue;
            }
            keyword_hits.push(KeywordHits {
                keyword: keyword.clone(),
                journals: Vec::new(),
            });
        }

        let mut ranked = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let Some(scored) = self.score_candidate(author_profile, author_keywords, candidate)
            else {
                continue;
            };

            for hits in keyword_hits.iter_mut() {
                if scored.matched_keywords.contains(&hits.keyword) {
                    hits.journals.push(scored.journal_id.clone());
                }
            }
            ranked.push(scored);
        }

        let scored_count = ranked.len();
        sort_recommendations(&mut ranked);
        ranked.truncate(self.config.max_results);

        tracing::debug!(
            target_year = self.config.target_year,
            candidates = candidates.len(),
            scored = scored_count,
            returned = ranked.len(),
            "ranked journal recommendations"
        );

        RankingOutcome {
            target_year: self.config.target_year,
            recommendations: ranked,
            keyword_hits,
        }
    }

    /// Scores one journal. Candidates with a blank identity are skipped (`None`).
    pub fn score_candidate(
        &self,
        author_profile: &RadarProfile,
        author_keywords: &KeywordSet,
        candidate: &JournalCandidate,
    ) -> Option<RecommendationCandidate> {
        let journal_id = candidate.journal_id.trim();
        if journal_id.is_empty() {
            return None;
        }

        let target_keywords = candidate
            .keywords_by_year
            .pick_for_year(self.config.target_year);
        let matched = target_keywords
            .map(|kw| match_keywords(author_keywords, kw))
            .unwrap_or_default();

        let keyword_ratio = matched.len() as f64 / author_keywords.len().max(1) as f64;

        let journal_profile = RadarProfile::build(&candidate.metrics);
        let similarity_pct = to_percent(similarity(author_profile, &journal_profile));

        let composite_score = self
            .config
            .weights
            .composite(keyword_ratio, f64::from(similarity_pct) / 100.0);

        Some(RecommendationCandidate {
            journal_id: journal_id.to_string(),
            year: candidate.year,
            category: candidate.category.clone(),
            keyword_hit_count: matched.len(),
            matched_keywords: matched,
            similarity_pct,
            composite_score,
        })
    }
}

/// Rounds a 0..=1 ratio to a whole percentage.
pub fn to_percent(ratio: f64) -> u8 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Composite score desc, then keyword hits desc, then similarity desc.
/// The sort is stable, so remaining ties keep input order.
fn sort_recommendations(ranked: &mut [RecommendationCandidate]) {
    ranked.sort_by(|a, b| {
        b.composite_score
            .total_cmp(&a.composite_score)
            .then_with(|| b.keyword_hit_count.cmp(&a.keyword_hit_count))
            .then_with(|| b.similarity_pct.cmp(&a.similarity_pct))
    });
}
