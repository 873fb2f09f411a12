use std::collections::BTreeMap;

use crate::JournalRow;
use crate::keywords::YearRange;
use crate::matching::JournalCandidate;

/// In-memory view over the journal-year rows supplied by the metrics repository.
#[derive(Debug, Clone, Default)]
pub struct JournalCatalog {
    rows: Vec<JournalRow>,
}

impl JournalCatalog {
    pub fn new(rows: Vec<JournalRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[JournalRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Latest row per journal, ordered by journal name.
    ///
    /// Rows with a blank journal are skipped. A row with a known year beats
    /// one without; among equal years the first row wins.
    pub fn latest_rows(&self) -> Vec<&JournalRow> {
        let mut latest: BTreeMap<&str, &JournalRow> = BTreeMap::new();
        for row in self.rows.iter().filter(|r| r.has_identity()) {
            latest
                .entry(row.journal.trim())
                .and_modify(|current| {
                    if row.year > current.year {
                        *current = row;
                    }
                })
                .or_insert(row);
        }
        latest.into_values().collect()
    }

    /// Every row of `journal`, newest year first.
    pub fn rows_for(&self, journal: &str) -> Vec<&JournalRow> {
        let wanted = journal.trim();
        let mut rows: Vec<&JournalRow> = self
            .rows
            .iter()
            .filter(|r| r.has_identity() && r.journal.trim() == wanted)
            .collect();
        rows.sort_by(|a, b| b.year.cmp(&a.year));
        rows
    }

    pub fn latest_for(&self, journal: &str) -> Option<&JournalRow> {
        self.rows_for(journal).into_iter().next()
    }

    pub fn journal_names(&self) -> Vec<&str> {
        self.latest_rows()
            .into_iter()
            .map(|row| row.journal.trim())
            .collect()
    }

    /// Ranker input: one candidate per journal, built from its latest row.
    pub fn candidates(&self, range: YearRange) -> Vec<JournalCandidate> {
        self.latest_rows()
            .into_iter()
            .map(|row| JournalCandidate::from_row(row, range))
            .collect()
    }
}

impl From<Vec<JournalRow>> for JournalCatalog {
    fn from(rows: Vec<JournalRow>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(journal: &str, year: Option<i32>, novelty: f64) -> JournalRow {
        let mut row = JournalRow {
            journal: journal.into(),
            year,
            ..JournalRow::default()
        };
        row.metrics.novelty = Some(novelty);
        row
    }

    fn catalog() -> JournalCatalog {
        JournalCatalog::new(vec![
            row("Beta Letters", Some(2023), 1.0),
            row("Alpha Review", Some(2024), 2.0),
            row("Beta Letters", Some(2025), 3.0),
            row("  ", Some(2025), 4.0),
            row("Alpha Review", Some(2022), 5.0),
            row("Gamma", None, 6.0),
        ])
    }

    #[test]
    fn latest_rows_keep_highest_year_sorted_by_name() {
        let catalog = catalog();
        let latest = catalog.latest_rows();

        let summary: Vec<(&str, Option<i32>)> = latest
            .iter()
            .map(|r| (r.journal.as_str(), r.year))
            .collect();
        assert_eq!(summary, vec![
            ("Alpha Review", Some(2024)),
            ("Beta Letters", Some(2025)),
            ("Gamma", None),
        ]);
    }

    #[test]
    fn rows_for_sorts_newest_first() {
        let catalog = catalog();
        let years: Vec<Option<i32>> = catalog
            .rows_for("Alpha Review")
            .iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![Some(2024), Some(2022)]);
        assert_eq!(catalog.latest_for(" Beta Letters ").and_then(|r| r.metrics.novelty), Some(3.0));
        assert!(catalog.latest_for("Missing").is_none());
    }

    #[test]
    fn names_skip_blank_identities() {
        assert_eq!(catalog().journal_names(), vec!["Alpha Review", "Beta Letters", "Gamma"]);
    }

    #[test]
    fn candidates_come_from_latest_rows() {
        let candidates = catalog().candidates(YearRange::DEFAULT);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[1].journal_id, "Beta Letters");
        assert_eq!(candidates[1].metrics.novelty, Some(3.0));
    }
}
