//! Normalization of the `locations_and_languages` payload into select options.
//!
//! Feeds the dashboard's location and language dropdowns: unique locations,
//! one language name per language code, and a per-location list of the
//! languages actually available there.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// A dropdown entry: `value` is what gets submitted, `label` what is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Option lists for the search form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOptions {
    pub locations: Vec<SelectOption>,
    pub languages: Vec<SelectOption>,
    pub location_languages: HashMap<String, Vec<SelectOption>>,
}

/// Typed view of the `locations_and_languages` response.
#[derive(Debug, Deserialize)]
pub struct MenuResponse {
    #[serde(default)]
    pub tasks: Vec<MenuTask>,
}

#[derive(Debug, Deserialize)]
pub struct MenuTask {
    #[serde(default)]
    pub result: Vec<LocationEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LocationEntry {
    pub location_code: i64,
    pub location_name: String,
    #[serde(default)]
    pub available_languages: Vec<AvailableLanguage>,
}

#[derive(Debug, Deserialize)]
pub struct AvailableLanguage {
    pub language_code: String,
    pub language_name: String,
}

/// Builds deduplicated option lists from the upstream response.
///
/// Locations are deduplicated by code, languages by language code (the first
/// name seen wins). Encounter order is preserved throughout so the dropdowns
/// match the upstream listing order.
#[must_use]
pub fn build_menu_options(response: &MenuResponse) -> MenuOptions {
    let mut locations = Vec::new();
    let mut seen_locations = HashSet::new();
    let mut languages = Vec::new();
    let mut seen_languages = HashSet::new();
    let mut location_languages: HashMap<String, Vec<SelectOption>> = HashMap::new();

    for entry in response.tasks.iter().flat_map(|task| &task.result) {
        let code = entry.location_code.to_string();
        if seen_locations.insert(code.clone()) {
            locations.push(SelectOption {
                value: code.clone(),
                label: entry.location_name.clone(),
            });
        }

        let entry_languages = location_languages.entry(code).or_default();
        for language in &entry.available_languages {
            if seen_languages.insert(language.language_code.clone()) {
                languages.push(SelectOption {
                    value: language.language_code.clone(),
                    label: language.language_name.clone(),
                });
            }
            if !entry_languages
                .iter()
                .any(|option| option.value == language.language_code)
            {
                entry_languages.push(SelectOption {
                    value: language.language_code.clone(),
                    label: language.language_name.clone(),
                });
            }
        }
    }

    MenuOptions {
        locations,
        languages,
        location_languages,
    }
}
