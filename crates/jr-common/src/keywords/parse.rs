use serde_json::Value;

use super::KeywordSet;

/// Delimiters tried in order for plain-text keyword encodings. The first one
/// present anywhere in the string is the only one used.
pub const KEYWORD_DELIMITERS: [&str; 6] = [";", "；", ",", "，", "|", "/"];

/// Upper bound on keywords taken from an author's free-text answer.
pub const MAX_USER_KEYWORDS: usize = 20;

/// Keyword encodings found in repository rows, resolved once at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordEncoding {
    Empty,
    /// JSON array of text values.
    Array(Vec<String>),
    /// JSON object; keys in encoded order, values (frequencies) discarded.
    Object(Vec<String>),
    Delimited {
        delimiter: &'static str,
        parts: Vec<String>,
    },
    Single(String),
}

impl KeywordEncoding {
    pub fn detect(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return KeywordEncoding::Empty;
        }

        // Valid JSON that is neither array nor object falls through to text rules.
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Array(items)) => {
                return KeywordEncoding::Array(items.iter().filter_map(array_item_text).collect());
            }
            Ok(Value::Object(map)) => {
                return KeywordEncoding::Object(map.keys().cloned().collect());
            }
            _ => {}
        }

        if let Some(delimiter) = KEYWORD_DELIMITERS
            .iter()
            .copied()
            .find(|d| trimmed.contains(d))
        {
            return KeywordEncoding::Delimited {
                delimiter,
                parts: split_trimmed(trimmed, delimiter),
            };
        }

        KeywordEncoding::Single(trimmed.to_string())
    }

    pub fn into_keywords(self) -> KeywordSet {
        match self {
            KeywordEncoding::Empty => KeywordSet::default(),
            KeywordEncoding::Array(items) | KeywordEncoding::Object(items) => items
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            KeywordEncoding::Delimited { parts, .. } => KeywordSet::new(parts),
            KeywordEncoding::Single(keyword) => KeywordSet::new(vec![keyword]),
        }
    }
}

fn array_item_text(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn split_trimmed(s: &str, delimiter: &str) -> Vec<String> {
    s.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canonicalize a stored keyword encoding. Never fails.
///
/// Precedence: JSON array, JSON object (keys), first matching delimiter,
/// single keyword. Empty input yields an empty set.
pub fn parse_keywords(raw: &str) -> KeywordSet {
    KeywordEncoding::detect(raw).into_keywords()
}

pub fn parse_keywords_opt(raw: Option<&str>) -> KeywordSet {
    raw.map(parse_keywords).unwrap_or_default()
}

/// Split an author's free-text keyword answer.
///
/// Unlike [`parse_keywords`], every delimiter (and line breaks/tabs) splits,
/// repeated entries are dropped, and at most [`MAX_USER_KEYWORDS`] are kept.
pub fn parse_user_keywords(raw: &str) -> KeywordSet {
    let mut keywords: Vec<String> = Vec::new();

    let parts = raw.split(|c: char| {
        matches!(c, '\n' | '\r' | '\t') || KEYWORD_DELIMITERS.iter().any(|d| d.starts_with(c))
    });

    for part in parts.map(str::trim).filter(|p| !p.is_empty()) {
        if keywords.iter().any(|k| k == part) {
            continue;
        }
        keywords.push(part.to_string());
        if keywords.len() >= MAX_USER_KEYWORDS {
            break;
        }
    }

    KeywordSet::new(keywords)
}
