//! Channel-selection coordinator.
//!
//! Decides whether a profile needs selecting at all, waits for the tile
//! image when the strategy keys on one, then dispatches to the registered
//! strategy and hands its result back untouched.

use crate::cache::ProviderCaches;
use crate::config::{ChanselConfig, TimeoutConfig};
use crate::diagnostics::{self, AvailableChannels};
use crate::presets::PresetCatalog;
use crate::primitives::wait_for_flag;
use crate::registry::StrategyRegistry;
use crate::strategy::{ProviderProfile, StrategyContext};
use chansel_common::{Page, PageQuery, SelectorResult};
use tracing::{debug, info, warn};

pub struct ChannelSelector {
    registry: StrategyRegistry,
    caches: ProviderCaches,
    timeouts: TimeoutConfig,
    presets: PresetCatalog,
}

impl Default for ChannelSelector {
    fn default() -> Self {
        Self::new(ChanselConfig::default())
    }
}

impl ChannelSelector {
    pub fn new(config: ChanselConfig) -> Self {
        Self::with_registry(StrategyRegistry::with_builtins(), config)
    }

    pub fn with_registry(registry: StrategyRegistry, config: ChanselConfig) -> Self {
        Self {
            registry,
            caches: ProviderCaches::new(),
            timeouts: config.timeouts,
            presets: PresetCatalog::new(config.presets),
        }
    }

    pub fn caches(&self) -> &ProviderCaches {
        &self.caches
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    /// Select the channel described by `profile` on `page`.
    ///
    /// Always terminates in a [`SelectorResult`]; page errors surface as
    /// failures produced by the strategy.
    pub async fn select_channel(
        &mut self,
        page: &mut dyn Page,
        profile: &ProviderProfile,
    ) -> SelectorResult {
        let selector = match profile.selector_value() {
            Some(selector) if !profile.is_noop() => selector,
            _ => {
                debug!(strategy = %profile.strategy, "No channel selection required");
                return SelectorResult::success();
            }
        };

        let Some(strategy) = self.registry.get(&profile.strategy) else {
            warn!(strategy = %profile.strategy, "Unknown channel selection strategy");
            return SelectorResult::failure(format!("unknown strategy: {}", profile.strategy));
        };

        if strategy.needs_image_readiness() {
            let ready = wait_for_flag(
                page,
                &PageQuery::ImageReady {
                    slug: selector.to_string(),
                },
                true,
                self.timeouts.image_ready(),
            )
            .await;
            if ready {
                debug!(slug = selector, "Channel image loaded");
            } else {
                // Best effort only: the strategy reports not-found itself.
                info!(
                    slug = selector,
                    timeout_ms = self.timeouts.image_ready_timeout_ms,
                    "Channel image not ready before timeout, dispatching anyway"
                );
            }
        }

        info!(strategy = strategy.id(), selector, "Selecting channel");
        let mut ctx = StrategyContext {
            timeouts: &self.timeouts,
            cache: self.caches.slot_mut(strategy.id()),
            presets: &self.presets,
        };
        let result = strategy.select(page, profile, &mut ctx).await;

        match &result {
            SelectorResult::Success => {
                info!(strategy = strategy.id(), selector, "Channel selected")
            }
            SelectorResult::Failure { reason } => info!(
                strategy = strategy.id(),
                selector,
                reason = %reason,
                "Channel selection failed"
            ),
        }
        result
    }

    /// Drop every provider cache. Called when the browser session is torn
    /// down and recreated.
    pub fn clear_all_caches(&mut self) {
        self.caches.clear_all();
    }

    /// Log the channel names a page offers after a failed match.
    pub fn log_available_channels(&self, options: &AvailableChannels<'_>) -> Option<String> {
        diagnostics::log_available_channels(options, &self.presets)
    }
}
