//! Author survey: Likert answers, the free-text keyword field, and the
//! URL-safe token that carries a survey between requests.
//!
//! Token format: base64url (no padding) of a JSON object
//! `{keywords_raw, keywords, scores{novelty, disruption, interdisciplinary,
//! theme_concentration, topic, hot_response}, created_at}`.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::MetricSet;
use crate::keywords::{KeywordSet, parse_user_keywords};
use crate::radar::RadarProfile;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("survey token is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("survey token is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("survey payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("at least one research keyword is required")]
    KeywordsRequired,
}

/// Maps a 1..=5 answer to 0..=100; out-of-range answers are clamped first.
pub fn likert_to_score(value: i32) -> f64 {
    f64::from(value.clamp(1, 5) - 1) * 25.0
}

/// Raw 1..=5 answers, one per metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikertAnswers {
    pub novelty: i32,
    pub disruption: i32,
    pub interdisciplinary: i32,
    pub theme_concentration: i32,
    pub topic: i32,
    pub hot_response: i32,
}

impl LikertAnswers {
    pub fn to_metrics(&self) -> MetricSet {
        MetricSet {
            novelty: Some(likert_to_score(self.novelty)),
            disruption: Some(likert_to_score(self.disruption)),
            interdisciplinary: Some(likert_to_score(self.interdisciplinary)),
            theme_concentration: Some(likert_to_score(self.theme_concentration)),
            topic_diversity: Some(likert_to_score(self.topic)),
            hot_response: Some(likert_to_score(self.hot_response)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    #[serde(default)]
    pub keywords_raw: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub scores: MetricSet,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SurveyResponse {
    pub fn from_answers(
        keywords_raw: &str,
        answers: &LikertAnswers,
        created_at: NaiveDateTime,
    ) -> Result<Self, SurveyError> {
        let keywords = parse_user_keywords(keywords_raw);
        if keywords.is_empty() {
            return Err(SurveyError::KeywordsRequired);
        }

        Ok(Self {
            keywords_raw: Some(keywords_raw.trim().to_string()),
            keywords: keywords.into_vec(),
            scores: answers.to_metrics(),
            created_at: Some(created_at.format(CREATED_AT_FORMAT).to_string()),
        })
    }

    pub fn metric_set(&self) -> MetricSet {
        self.scores
    }

    pub fn keyword_set(&self) -> KeywordSet {
        KeywordSet::new(self.keywords.clone())
    }

    pub fn radar_profile(&self) -> RadarProfile {
        RadarProfile::build(&self.scores)
    }
}

pub fn encode_token(survey: &SurveyResponse) -> Result<String, SurveyError> {
    let json = serde_json::to_vec(survey)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Accepts padded or unpadded input. Malformed tokens are typed errors.
pub fn decode_token(token: &str) -> Result<SurveyResponse, SurveyError> {
    let trimmed = token.trim().trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD.decode(trimmed)?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}
