//! Forgiving deserializers for repository and survey payloads.
//!
//! Upstream rows are produced by an analysis pipeline that is not always
//! consistent about types: numbers arrive as strings, keyword lists arrive
//! either as encoded strings or as nested JSON. None of that is an error here.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a JSON value to a finite `f64`. Numeric strings are accepted.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

pub fn f64_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

/// Year-keyed raw keyword encodings.
///
/// String values are kept verbatim; structured values are re-encoded as JSON so
/// the keyword parser sees one representation. Nulls and non-year keys are
/// dropped.
pub fn raw_keyword_map<'de, D>(deserializer: D) -> Result<BTreeMap<i32, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(entries) = value else {
        return Ok(BTreeMap::new());
    };

    let map = entries
        .into_iter()
        .filter_map(|(key, raw)| {
            let year = key.trim().parse::<i32>().ok()?;
            let encoded = match raw {
                Value::Null => return None,
                Value::String(s) => s,
                other => other.to_string(),
            };
            Some((year, encoded))
        })
        .collect();

    Ok(map)
}
