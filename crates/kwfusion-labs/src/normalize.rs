//! Normalization of raw DataForSEO Labs payloads into flat keyword records.
//!
//! The upstream envelope nests results as `tasks[0].result[0].items[]`, and
//! any field at any level may be absent, null, or mistyped. [`normalize`] maps
//! each item into a fully-populated [`KeywordRecord`], substituting defaults
//! instead of failing, and returns an empty list when the envelope itself is
//! missing entirely. A missing envelope is the "no results" case, not an
//! error.

use serde::Serialize;

/// One month of search volume for a keyword, keyed `"YYYY-MM"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyVolume {
    pub month: String,
    pub search_volume: u64,
}

/// Search-intent classification for a keyword.
///
/// `foreign` is `Some` only when the upstream value is an array of strings;
/// it serializes as `null` otherwise, matching the UI contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchIntent {
    pub main: String,
    pub foreign: Option<Vec<String>>,
}

/// A flat, UI-ready keyword record.
///
/// Every field is always present and well-typed in the serialized output,
/// even when the corresponding raw field was missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRecord {
    pub keyword: String,
    pub search_volume: u64,
    pub cpc: f64,
    pub competition: f64,
    pub competition_level: String,
    pub difficulty: u8,
    pub intent: SearchIntent,
    pub related_keywords: Vec<String>,
    pub monthly_data: Vec<MonthlyVolume>,
}

impl Default for KeywordRecord {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            search_volume: 0,
            cpc: 0.0,
            competition: 0.0,
            competition_level: "unknown".to_string(),
            difficulty: 0,
            intent: SearchIntent {
                main: String::new(),
                foreign: None,
            },
            related_keywords: Vec::new(),
            monthly_data: Vec::new(),
        }
    }
}

/// Normalizes a raw related-keywords payload into flat records.
///
/// Resolves `tasks[0].result[0].items`; if any link in that chain is absent
/// or not an array, returns an empty list. Otherwise maps every item, in
/// upstream order (the order reflects relevance ranking and is preserved),
/// so the output length always equals `items.len()`.
///
/// Pure and deterministic: no I/O, no shared state, same input -> same output.
#[must_use]
pub fn normalize(raw: &serde_json::Value) -> Vec<KeywordRecord> {
    let Some(items) = raw
        .get("tasks")
        .and_then(serde_json::Value::as_array)
        .and_then(|tasks| tasks.first())
        .and_then(|task| task.get("result"))
        .and_then(serde_json::Value::as_array)
        .and_then(|results| results.first())
        .and_then(|result| result.get("items"))
        .and_then(serde_json::Value::as_array)
    else {
        return Vec::new();
    };

    items.iter().map(map_item).collect()
}

fn map_item(item: &serde_json::Value) -> KeywordRecord {
    let data = item.get("keyword_data").unwrap_or(&serde_json::Value::Null);
    let info = data.get("keyword_info").unwrap_or(&serde_json::Value::Null);
    let properties = data
        .get("keyword_properties")
        .unwrap_or(&serde_json::Value::Null);
    let intent_info = data
        .get("search_intent_info")
        .unwrap_or(&serde_json::Value::Null);

    KeywordRecord {
        keyword: data
            .get("keyword")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string(),
        search_volume: info
            .get("search_volume")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0),
        cpc: info
            .get("cpc")
            .and_then(serde_json::Value::as_f64)
            .map_or(0.0, |v| v.max(0.0)),
        competition: info
            .get("competition")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or(0.0),
        competition_level: info
            .get("competition_level")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("unknown")
            .to_string(),
        difficulty: properties
            .get("keyword_difficulty")
            .and_then(serde_json::Value::as_u64)
            .map_or(0, |v| u8::try_from(v.min(100)).unwrap_or(100)),
        intent: SearchIntent {
            main: intent_info
                .get("main_intent")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string(),
            foreign: intent_info
                .get("foreign_intent")
                .and_then(serde_json::Value::as_array)
                .and_then(|values| {
                    values
                        .iter()
                        .map(|v| v.as_str().map(str::to_string))
                        .collect::<Option<Vec<_>>>()
                }),
        },
        related_keywords: data
            .get("related_keywords")
            .and_then(serde_json::Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        monthly_data: info
            .get("monthly_searches")
            .and_then(serde_json::Value::as_array)
            .map(|entries| entries.iter().map(map_monthly).collect())
            .unwrap_or_default(),
    }
}

fn map_monthly(entry: &serde_json::Value) -> MonthlyVolume {
    let year = entry
        .get("year")
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(0);
    let month = entry
        .get("month")
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(0);

    MonthlyVolume {
        month: format!("{year}-{month:02}"),
        search_volume: entry
            .get("search_volume")
            .and_then(serde_json::Value::as_u64)
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(items: serde_json::Value) -> serde_json::Value {
        json!({
            "status_code": 20000,
            "status_message": "Ok.",
            "tasks": [{ "result": [{ "items": items }] }]
        })
    }

    fn full_item(keyword: &str, volume: u64) -> serde_json::Value {
        json!({
            "keyword_data": {
                "keyword": keyword,
                "keyword_info": {
                    "search_volume": volume,
                    "cpc": 1.25,
                    "competition": 0.42,
                    "competition_level": "MEDIUM",
                    "monthly_searches": [
                        { "year": 2024, "month": 3, "search_volume": volume },
                        { "year": 2024, "month": 11, "search_volume": volume + 10 }
                    ]
                },
                "keyword_properties": { "keyword_difficulty": 37 },
                "search_intent_info": {
                    "main_intent": "informational",
                    "foreign_intent": ["es", "fr"]
                },
                "related_keywords": ["a", "b"]
            }
        })
    }

    #[test]
    fn missing_envelope_links_yield_empty_list() {
        for raw in [
            json!({}),
            json!({ "tasks": [] }),
            json!({ "tasks": "not-a-list" }),
            json!({ "tasks": [{}] }),
            json!({ "tasks": [{ "result": [] }] }),
            json!({ "tasks": [{ "result": [{}] }] }),
            json!({ "tasks": [{ "result": [{ "items": 7 }] }] }),
        ] {
            assert!(normalize(&raw).is_empty(), "expected no records for {raw}");
        }
    }

    #[test]
    fn absent_keyword_data_yields_all_defaults_record() {
        let records = normalize(&envelope(json!([{}])));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], KeywordRecord::default());
        assert_eq!(records[0].keyword, "");
        assert_eq!(records[0].competition_level, "unknown");
        assert!(records[0].intent.foreign.is_none());
    }

    #[test]
    fn output_length_matches_item_count() {
        let records = normalize(&envelope(json!([
            full_item("one", 10),
            {},
            full_item("three", 30)
        ])));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn months_are_zero_padded() {
        let records = normalize(&envelope(json!([full_item("kw", 100)])));
        let months: Vec<&str> = records[0]
            .monthly_data
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(months, ["2024-03", "2024-11"]);
    }

    #[test]
    fn normalize_is_deterministic() {
        let raw = envelope(json!([full_item("kw", 100), {}]));
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn order_follows_input_items() {
        let records = normalize(&envelope(json!([
            full_item("zebra", 1),
            full_item("apple", 2),
            full_item("mango", 3)
        ])));
        let keywords: Vec<&str> = records.iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn mistyped_search_volume_falls_back_to_zero() {
        let raw = envelope(json!([{
            "keyword_data": {
                "keyword": "kw",
                "keyword_info": { "search_volume": "not a number" }
            }
        }]));
        let records = normalize(&raw);
        assert_eq!(records[0].search_volume, 0);
        assert_eq!(records[0].keyword, "kw");
    }

    #[test]
    fn foreign_intent_passes_through_string_lists_only() {
        let with_list = normalize(&envelope(json!([full_item("kw", 1)])));
        assert_eq!(
            with_list[0].intent.foreign.as_deref(),
            Some(["es".to_string(), "fr".to_string()].as_slice())
        );

        let without = normalize(&envelope(json!([{
            "keyword_data": { "search_intent_info": { "main_intent": "navigational" } }
        }])));
        assert_eq!(without[0].intent.main, "navigational");
        assert!(without[0].intent.foreign.is_none());

        let mistyped = normalize(&envelope(json!([{
            "keyword_data": { "search_intent_info": { "foreign_intent": ["es", 42] } }
        }])));
        assert!(mistyped[0].intent.foreign.is_none());
    }

    #[test]
    fn missing_keyword_properties_defaults_only_that_difficulty() {
        let mut degraded = full_item("middle", 20);
        degraded["keyword_data"]
            .as_object_mut()
            .expect("keyword_data object")
            .remove("keyword_properties");

        let records = normalize(&envelope(json!([
            full_item("first", 10),
            degraded,
            full_item("last", 30)
        ])));
        assert_eq!(records[0].difficulty, 37);
        assert_eq!(records[1].difficulty, 0);
        assert_eq!(records[2].difficulty, 37);
        assert_eq!(records[1].keyword, "middle");
        assert_eq!(records[1].search_volume, 20);
    }

    #[test]
    fn difficulty_clamps_out_of_range_values() {
        let raw = envelope(json!([{
            "keyword_data": { "keyword_properties": { "keyword_difficulty": 250 } }
        }]));
        assert_eq!(normalize(&raw)[0].difficulty, 100);
    }

    #[test]
    fn negative_cpc_is_floored_at_zero() {
        let raw = envelope(json!([{
            "keyword_data": { "keyword_info": { "cpc": -0.5 } }
        }]));
        assert!((normalize(&raw)[0].cpc - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn records_serialize_with_camel_case_field_names() {
        let records = normalize(&envelope(json!([full_item("kw", 5)])));
        let value = serde_json::to_value(&records[0]).expect("serialize record");
        assert_eq!(value["searchVolume"].as_u64(), Some(5));
        assert_eq!(value["competitionLevel"].as_str(), Some("MEDIUM"));
        assert_eq!(value["monthlyData"][0]["month"].as_str(), Some("2024-03"));
        assert_eq!(value["monthlyData"][0]["searchVolume"].as_u64(), Some(5));
        assert_eq!(value["relatedKeywords"][1].as_str(), Some("b"));
        assert_eq!(value["intent"]["main"].as_str(), Some("informational"));
    }
}
