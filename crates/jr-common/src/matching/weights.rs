/// Share of the composite score earned by keyword overlap.
pub const KEYWORD_WEIGHT: f64 = 60.0;

/// Share of the composite score earned by radar profile similarity.
pub const SIMILARITY_WEIGHT: f64 = 40.0;

/// Length of the recommendation shortlist.
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Composite score weights (ranking, 0..=100 scale)
pub const RECOMMENDATION_WEIGHTS: ScoreWeights = ScoreWeights {
    keyword: KEYWORD_WEIGHT,
    similarity: SIMILARITY_WEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub keyword: f64,
    pub similarity: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.keyword + self.similarity
    }

    /// `keyword_ratio` and `similarity` are both on 0..=1.
    pub fn composite(&self, keyword_ratio: f64, similarity: f64) -> f64 {
        keyword_ratio * self.keyword + similarity * self.similarity
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        RECOMMENDATION_WEIGHTS
    }
}
