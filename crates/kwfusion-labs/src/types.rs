//! Request types for the DataForSEO Labs API.

use serde::{Deserialize, Serialize};

/// Parameters for a related-keywords search.
///
/// Serialized verbatim as the single element of the upstream request array.
/// The serde defaults mirror the dashboard form: United States (2840),
/// English, depth 3, limit 20, all flags off. An inbound request body may
/// supply only `keyword`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedKeywordsRequest {
    pub keyword: String,
    #[serde(default = "default_location_code")]
    pub location_code: i64,
    #[serde(default = "default_language_code")]
    pub language_code: String,
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub include_seed_keyword: bool,
    #[serde(default)]
    pub include_serp_info: bool,
    #[serde(default)]
    pub ignore_synonyms: bool,
    #[serde(default)]
    pub include_clickstream_data: bool,
    #[serde(default)]
    pub replace_with_core_keyword: bool,
}

fn default_location_code() -> i64 {
    2840
}

fn default_language_code() -> String {
    "en".to_string()
}

fn default_depth() -> u32 {
    3
}

fn default_limit() -> u32 {
    20
}
