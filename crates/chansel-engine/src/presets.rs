//! Built-in and configured channel presets.
//!
//! A preset is a named provider profile. Preset names carry a provider
//! family suffix (`espn-guide`, `nbc-tiles`) which diagnostics use to find
//! the channels a family already covers.

use crate::strategy::ProviderProfile;
use chansel_common::normalize_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetEntry {
    pub name: String,
    /// Player page the preset tunes on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub profile: ProviderProfile,
}

impl PresetEntry {
    pub fn new(name: impl Into<String>, profile: ProviderProfile) -> Self {
        Self {
            name: name.into(),
            url: None,
            profile,
        }
    }
}

pub fn builtin_presets() -> Vec<PresetEntry> {
    vec![
        PresetEntry::new("espn-guide", ProviderProfile::new("guide", "ESPN")),
        PresetEntry::new("cnn-guide", ProviderProfile::new("guide", "CNN")),
        PresetEntry::new("fox-news-guide", ProviderProfile::new("guide", "Fox News")),
        PresetEntry::new("abc-guide", ProviderProfile::new("guide", "ABC")),
        PresetEntry::new("nbc-tiles", ProviderProfile::new("tile", "nbc-logo")),
        PresetEntry::new(
            "pbs-tiles",
            ProviderProfile::new("tile", "pbs-logo").with_confirm("button[aria-label='Play']"),
        ),
    ]
}

#[derive(Debug, Clone, Default)]
pub struct PresetCatalog {
    entries: Vec<PresetEntry>,
}

impl PresetCatalog {
    pub fn new(entries: Vec<PresetEntry>) -> Self {
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(builtin_presets())
    }

    pub fn get(&self, name: &str) -> Option<&PresetEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn list(&self) -> &[PresetEntry] {
        &self.entries
    }

    /// Normalized selector values of every preset whose name ends with
    /// `suffix`.
    pub fn selectors_for_suffix(&self, suffix: &str) -> HashSet<String> {
        self.entries
            .iter()
            .filter(|e| e.name.ends_with(suffix))
            .filter_map(|e| e.profile.selector.as_deref())
            .map(normalize_name)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
