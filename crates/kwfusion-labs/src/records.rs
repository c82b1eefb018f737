//! Sorting, filtering, and CSV export over normalized keyword records.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::Serialize;

use crate::normalize::KeywordRecord;

/// Column a record list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Keyword,
    SearchVolume,
    Cpc,
    Competition,
    CompetitionLevel,
    Difficulty,
}

/// Sort direction toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keyword" => Ok(Self::Keyword),
            "search-volume" | "search_volume" => Ok(Self::SearchVolume),
            "cpc" => Ok(Self::Cpc),
            "competition" => Ok(Self::Competition),
            "competition-level" | "competition_level" => Ok(Self::CompetitionLevel),
            "difficulty" => Ok(Self::Difficulty),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Sorts records in place by a single column.
///
/// The sort is stable, so records that compare equal keep their upstream
/// relevance order; the original index acts as the implicit secondary key.
pub fn sort_records(records: &mut [KeywordRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Keyword => a.keyword.cmp(&b.keyword),
            SortKey::SearchVolume => a.search_volume.cmp(&b.search_volume),
            SortKey::Cpc => a.cpc.partial_cmp(&b.cpc).unwrap_or(Ordering::Equal),
            SortKey::Competition => a
                .competition
                .partial_cmp(&b.competition)
                .unwrap_or(Ordering::Equal),
            SortKey::CompetitionLevel => a.competition_level.cmp(&b.competition_level),
            SortKey::Difficulty => a.difficulty.cmp(&b.difficulty),
        };
        match order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Retains only the records whose keyword appears in `selected`.
///
/// Mirrors the dashboard's chart keyword picker; record order is preserved.
#[must_use]
pub fn filter_selected(records: &[KeywordRecord], selected: &[String]) -> Vec<KeywordRecord> {
    records
        .iter()
        .filter(|record| selected.iter().any(|keyword| *keyword == record.keyword))
        .cloned()
        .collect()
}

/// One chart row: a month plus each record's volume for that month.
///
/// `volumes` is parallel to the input record order; a record with no data for
/// the month contributes 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySeriesRow {
    pub month: String,
    pub volumes: Vec<u64>,
}

/// Merges the monthly series of several records into chart rows.
///
/// Takes the union of all months across the records, sorted ascending (the
/// `"YYYY-MM"` key sorts chronologically as a string), and fills gaps with 0.
#[must_use]
pub fn merge_monthly_series(records: &[KeywordRecord]) -> Vec<MonthlySeriesRow> {
    let months: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.monthly_data.iter())
        .map(|entry| entry.month.as_str())
        .collect();

    months
        .into_iter()
        .map(|month| MonthlySeriesRow {
            month: month.to_string(),
            volumes: records
                .iter()
                .map(|record| {
                    record
                        .monthly_data
                        .iter()
                        .find(|entry| entry.month == month)
                        .map_or(0, |entry| entry.search_volume)
                })
                .collect(),
        })
        .collect()
}

const CSV_HEADERS: [&str; 6] = [
    "Keyword",
    "Search Volume",
    "Difficulty",
    "CPC",
    "Competition",
    "Intent",
];

/// Download filename for an export anchored on the seed keyword.
#[must_use]
pub fn csv_filename(seed_keyword: &str) -> String {
    format!("keyword-results-{seed_keyword}.csv")
}

/// Renders records as CSV, one row per record in the given order.
///
/// No quoting: embedded delimiters in keyword text pass through unescaped.
#[must_use]
pub fn to_csv(records: &[KeywordRecord]) -> String {
    let mut lines = vec![CSV_HEADERS.join(",")];
    lines.extend(records.iter().map(|record| {
        format!(
            "{},{},{},{},{},{}",
            record.keyword,
            record.search_volume,
            record.difficulty,
            record.cpc,
            record.competition_level,
            intent_label(&record.intent),
        )
    }));
    lines.join("\n")
}

fn intent_label(intent: &crate::normalize::SearchIntent) -> String {
    match intent.foreign.as_deref() {
        Some(foreign) if !foreign.is_empty() => {
            format!("{} + {}", intent.main, foreign.join(", "))
        }
        _ => intent.main.clone(),
    }
}
