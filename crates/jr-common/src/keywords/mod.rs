mod normalize;
mod parse;
mod years;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use normalize::{normalize_keyword, normalize_optional};
pub use parse::{
    KEYWORD_DELIMITERS, KeywordEncoding, MAX_USER_KEYWORDS, parse_keywords, parse_keywords_opt,
    parse_user_keywords,
};
pub use years::{KeywordsByYear, YearRange, pick_keywords_for_year};

/// Ordered keyword list for one (entity, year) pair.
///
/// Entries keep their display form (trimmed, original case). Matching always
/// goes through [`normalize_keyword`]. Duplicates are kept unless
/// [`KeywordSet::deduplicated`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new(keywords: Vec<String>) -> Self {
        Self(keywords)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Normalized forms, empties excluded.
    pub fn normalized_set(&self) -> HashSet<String> {
        self.0
            .iter()
            .map(|k| normalize_keyword(k))
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Drops later entries whose normalized form was already seen.
    pub fn deduplicated(&self) -> Self {
        let mut seen = HashSet::new();
        self.0
            .iter()
            .filter(|k| seen.insert(normalize_keyword(k)))
            .cloned()
            .collect()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        Self(keywords)
    }
}

impl FromIterator<String> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for KeywordSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Author keywords whose normalized form appears in `journal`, in author order.
///
/// Repeated author keywords are reported (and counted) once per occurrence.
pub fn match_keywords(author: &KeywordSet, journal: &KeywordSet) -> Vec<String> {
    let journal_norm = journal.normalized_set();
    if journal_norm.is_empty() {
        return Vec::new();
    }

    author
        .iter()
        .filter(|k| journal_norm.contains(&normalize_keyword(k)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> KeywordSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_ignore_case_and_spacing() {
        let author = set(&["Deep   Learning", "Graph Theory"]);
        let journal = set(&["deep learning", "nlp"]);

        assert_eq!(match_keywords(&author, &journal), vec!["Deep   Learning"]);
    }

    #[test]
    fn empty_normalized_forms_never_match() {
        let author = set(&["  ", "nlp"]);
        let journal = set(&["", "NLP"]);

        assert_eq!(match_keywords(&author, &journal), vec!["nlp"]);
    }

    #[test]
    fn duplicates_are_kept_until_requested() {
        let keywords = set(&["NLP", "nlp", "vision", " NLP "]);

        assert_eq!(keywords.len(), 4);
        assert_eq!(keywords.deduplicated(), set(&["NLP", "vision"]));
    }

    #[test]
    fn duplicate_author_keywords_match_per_occurrence() {
        let author = set(&["nlp", "NLP"]);
        let journal = set(&["nlp"]);

        assert_eq!(match_keywords(&author, &journal).len(), 2);
    }
}
