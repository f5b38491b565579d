//! Channel selection strategies.
//!
//! A strategy is the provider-family implementation of the
//! locate → click → confirm protocol. Strategies are registered in the
//! [`StrategyRegistry`](crate::registry::StrategyRegistry) under their
//! identifier and invoked by the coordinator.

pub mod confirm;
pub mod guide;
pub mod tile;

use crate::cache::ProviderCache;
use crate::config::TimeoutConfig;
use crate::diagnostics::{self, AvailableChannels};
use crate::presets::PresetCatalog;
use async_trait::async_trait;
use chansel_common::{Page, SelectorResult};
use serde::{Deserialize, Serialize};

pub use guide::GuideStrategy;
pub use tile::TileStrategy;

/// Strategy identifier meaning "single-channel site, nothing to select".
pub const NOOP_STRATEGY: &str = "none";

/// Resolved, read-only configuration for one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    #[serde(default = "default_strategy")]
    pub strategy: String,
    /// Image slug, station code or display name, depending on strategy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Secondary element (e.g. a modal "play" button) clicked after the
    /// channel itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_attribute: Option<String>,
    /// Preset family suffix used to filter not-found diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset_suffix: Option<String>,
    /// Extra channel names to leave out of not-found diagnostics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_channels: Vec<String>,
}

fn default_strategy() -> String {
    NOOP_STRATEGY.to_string()
}

impl Default for ProviderProfile {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            selector: None,
            confirm_selector: None,
            row_selector: None,
            name_attribute: None,
            preset_suffix: None,
            known_channels: Vec::new(),
        }
    }
}

impl ProviderProfile {
    pub fn new(strategy: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    pub fn with_confirm(mut self, selector: impl Into<String>) -> Self {
        self.confirm_selector = Some(selector.into());
        self
    }

    pub fn is_noop(&self) -> bool {
        self.strategy == NOOP_STRATEGY
    }

    /// The selector value, treating blank strings as absent.
    pub fn selector_value(&self) -> Option<&str> {
        self.selector.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn confirm_selector_value(&self) -> Option<&str> {
        self.confirm_selector
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// Everything a strategy may touch besides the page: its own cache slot,
/// the configured timeouts and the preset catalog for diagnostics.
pub struct StrategyContext<'a> {
    pub timeouts: &'a TimeoutConfig,
    pub cache: &'a mut ProviderCache,
    pub presets: &'a PresetCatalog,
}

impl StrategyContext<'_> {
    pub fn log_available_channels(&self, options: &AvailableChannels<'_>) -> Option<String> {
        diagnostics::log_available_channels(options, self.presets)
    }
}

#[async_trait]
pub trait SelectionStrategy: Send + Sync {
    /// Registry identifier, matched against `ProviderProfile::strategy`.
    fn id(&self) -> &'static str;

    /// Whether the selector is an image-URL fragment worth waiting on
    /// before dispatch.
    fn needs_image_readiness(&self) -> bool {
        true
    }

    /// Locate, click and (optionally) confirm the channel. Only called
    /// with a profile whose selector is present.
    async fn select(
        &self,
        page: &mut dyn Page,
        profile: &ProviderProfile,
        ctx: &mut StrategyContext<'_>,
    ) -> SelectorResult;
}
