pub mod ranking;
pub mod similarity;
pub mod weights;

pub use ranking::{
    JournalCandidate, KeywordHits, RankingConfig, RankingOutcome, RecommendationCandidate,
    RecommendationRanker, to_percent,
};
pub use similarity::{similarity, similarity_of_values, similarity_opt};
