use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use super::{KeywordSet, parse_keywords};

/// Closed range of years covered by per-year keyword data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "YearBounds")]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Years populated in the current dataset.
    pub const DEFAULT: YearRange = YearRange {
        start: 2021,
        end: 2025,
    };

    /// Bounds given in reverse are swapped.
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    pub fn years(&self) -> impl DoubleEndedIterator<Item = i32> {
        self.start..=self.end
    }
}

#[derive(Deserialize)]
struct YearBounds {
    start: i32,
    end: i32,
}

impl From<YearBounds> for YearRange {
    fn from(bounds: YearBounds) -> Self {
        YearRange::new(bounds.start, bounds.end)
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Keyword lists of one journal keyed by year, restricted to a [`YearRange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordsByYear {
    range: YearRange,
    years: BTreeMap<i32, KeywordSet>,
}

impl KeywordsByYear {
    pub fn new(range: YearRange) -> Self {
        Self {
            range,
            years: BTreeMap::new(),
        }
    }

    /// Parses every raw encoding; years outside `range` are ignored.
    pub fn from_raw<'a, I>(range: YearRange, raw: I) -> Self
    where
        I: IntoIterator<Item = (i32, &'a str)>,
    {
        let mut map = Self::new(range);
        for (year, encoded) in raw {
            map.insert(year, parse_keywords(encoded));
        }
        map
    }

    /// Returns `false` (and stores nothing) for years outside the range.
    pub fn insert(&mut self, year: i32, keywords: KeywordSet) -> bool {
        if !self.range.contains(year) {
            return false;
        }
        self.years.insert(year, keywords);
        true
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    pub fn get(&self, year: i32) -> Option<&KeywordSet> {
        self.years.get(&year)
    }

    /// Keyword list for `year`, falling back to the closest earlier year with
    /// data. Never looks past the start of the range.
    pub fn pick_for_year(&self, year: i32) -> Option<&KeywordSet> {
        let newest = year.min(self.range.end);
        (self.range.start..=newest)
            .rev()
            .filter_map(|y| self.years.get(&y))
            .find(|keywords| !keywords.is_empty())
    }

    /// Every year of the range, empty lists included.
    pub fn all_years(&self) -> BTreeMap<i32, KeywordSet> {
        self.range
            .years()
            .map(|y| (y, self.years.get(&y).cloned().unwrap_or_default()))
            .collect()
    }
}

impl Serialize for KeywordsByYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.all_years().serialize(serializer)
    }
}

pub fn pick_keywords_for_year(map: &KeywordsByYear, year: i32) -> KeywordSet {
    map.pick_for_year(year).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_with(entries: &[(i32, &str)]) -> KeywordsByYear {
        KeywordsByYear::from_raw(YearRange::DEFAULT, entries.iter().copied())
    }

    #[test]
    fn exact_year_is_preferred() {
        let map = map_with(&[(2024, "a;b"), (2025, "c")]);
        assert_eq!(pick_keywords_for_year(&map, 2025).into_vec(), vec!["c"]);
        assert_eq!(pick_keywords_for_year(&map, 2024).into_vec(), vec!["a", "b"]);
    }

    #[test]
    fn falls_back_to_nearest_earlier_populated_year() {
        let map = map_with(&[(2021, "old"), (2023, "x,y"), (2024, ""), (2025, "  ")]);
        assert_eq!(pick_keywords_for_year(&map, 2025).into_vec(), vec!["x", "y"]);
    }

    #[test]
    fn years_after_the_range_fall_back_into_it() {
        let map = map_with(&[(2023, "x")]);
        assert_eq!(pick_keywords_for_year(&map, 2026).into_vec(), vec!["x"]);
        assert_eq!(pick_keywords_for_year(&map, i32::MAX).into_vec(), vec!["x"]);
    }

    #[test]
    fn never_looks_forward() {
        let map = map_with(&[(2024, "later")]);
        assert!(pick_keywords_for_year(&map, 2022).is_empty());
        assert!(pick_keywords_for_year(&map, 1999).is_empty());
    }

    #[test]
    fn out_of_range_years_are_not_stored() {
        let mut map = KeywordsByYear::new(YearRange::DEFAULT);
        assert!(!map.insert(2030, KeywordSet::new(vec!["future".into()])));
        assert!(map.get(2030).is_none());
        assert!(map.insert(2022, KeywordSet::new(vec!["ok".into()])));
    }

    #[test]
    fn reversed_range_is_normalized() {
        let range = YearRange::new(2025, 2021);
        assert_eq!(range, YearRange::DEFAULT);
        assert_eq!(range.years().count(), 5);
    }

    #[test]
    fn deserialized_range_swaps_reversed_bounds() {
        let range: YearRange =
            serde_json::from_value(serde_json::json!({"start": 2025, "end": 2021})).unwrap();
        assert_eq!(range, YearRange::DEFAULT);
        assert_eq!(range.years().count(), 5);
    }

    #[test]
    fn serializes_every_year_of_the_range() {
        let map = map_with(&[(2022, "a")]);
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["2022"], serde_json::json!(["a"]));
        assert_eq!(json["2025"], serde_json::json!([]));
        assert_eq!(json.as_object().unwrap().len(), 5);
    }
}
