use chrono::{Datelike, Utc};

use crate::keywords::YearRange;
use crate::matching::RankingConfig;
use crate::matching::weights::MAX_RECOMMENDATIONS;

pub const TARGET_YEAR_ENV: &str = "JR_TARGET_YEAR";
pub const YEAR_START_ENV: &str = "JR_KEYWORD_YEAR_START";
pub const YEAR_END_ENV: &str = "JR_KEYWORD_YEAR_END";
pub const MAX_RECOMMENDATIONS_ENV: &str = "JR_MAX_RECOMMENDATIONS";

/// Runtime knobs of the recommendation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub target_year: i32,
    pub year_range: YearRange,
    pub max_recommendations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_year: Utc::now().year(),
            year_range: YearRange::DEFAULT,
            max_recommendations: MAX_RECOMMENDATIONS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read_i32 = |key: &str| lookup(key).and_then(|v| v.trim().parse::<i32>().ok());

        let target_year = read_i32(TARGET_YEAR_ENV).unwrap_or(defaults.target_year);
        let year_range = YearRange::new(
            read_i32(YEAR_START_ENV).unwrap_or(defaults.year_range.start()),
            read_i32(YEAR_END_ENV).unwrap_or(defaults.year_range.end()),
        );
        let max_recommendations = lookup(MAX_RECOMMENDATIONS_ENV)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_recommendations);

        Self {
            target_year,
            year_range,
            max_recommendations,
        }
    }

    pub fn ranking_config(&self) -> RankingConfig {
        RankingConfig {
            max_results: self.max_recommendations,
            ..RankingConfig::for_year(self.target_year)
        }
    }
}
