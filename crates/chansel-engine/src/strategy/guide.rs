//! Channel guide selection keyed by display name.
//!
//! Guide rows are discovered once per browser session and their positions
//! cached by normalized name. A cached position is trusted only while the
//! row at that index still carries the wanted name; anything else falls
//! back to rediscovery.

use super::confirm::run_confirmation;
use super::{ProviderProfile, SelectionStrategy, StrategyContext};
use crate::diagnostics::AvailableChannels;
use crate::primitives::{click_target, normalize_name};
use async_trait::async_trait;
use chansel_common::page::{eval_list, eval_target, eval_text};
use chansel_common::{ClickTarget, Page, PageQuery, SelectorResult};
use std::collections::HashMap;
use tracing::{debug, info};

pub const DEFAULT_ROW_SELECTOR: &str = "[data-channel-name]";

const ROWS_KEY: &str = "rows";

/// Where the guide rows live and how their names are read.
struct RowSource<'a> {
    row_selector: &'a str,
    name_attribute: Option<&'a str>,
}

impl<'a> RowSource<'a> {
    fn from_profile(profile: &'a ProviderProfile) -> Self {
        Self {
            row_selector: profile.row_selector.as_deref().unwrap_or(DEFAULT_ROW_SELECTOR),
            name_attribute: profile.name_attribute.as_deref(),
        }
    }

    async fn names(&self, page: &mut dyn Page) -> Result<Vec<String>, String> {
        let names: Option<Vec<String>> = eval_list(
            page,
            &PageQuery::GuideRowNames {
                row_selector: self.row_selector.to_string(),
                name_attribute: self.name_attribute.map(str::to_string),
            },
        )
        .await
        .map_err(|e| format!("guide lookup failed: {}", e))?;
        Ok(names.unwrap_or_default())
    }

    async fn name_at(
        &self,
        page: &mut dyn Page,
        index: usize,
    ) -> Result<Option<String>, String> {
        eval_text(
            page,
            &PageQuery::GuideRowName {
                row_selector: self.row_selector.to_string(),
                index,
                name_attribute: self.name_attribute.map(str::to_string),
            },
        )
        .await
        .map_err(|e| format!("guide row lookup failed: {}", e))
    }

    async fn center(
        &self,
        page: &mut dyn Page,
        index: usize,
    ) -> Result<Option<ClickTarget>, String> {
        eval_target(
            page,
            &PageQuery::GuideRowCenter {
                row_selector: self.row_selector.to_string(),
                index,
            },
        )
        .await
        .map_err(|e| format!("guide row lookup failed: {}", e))
    }
}

#[derive(Debug, Default)]
pub struct GuideStrategy;

impl GuideStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `wanted` from the cached row table. `Ok(None)` means the
    /// cache had nothing usable and has been dropped if it was stale.
    async fn from_cache(
        page: &mut dyn Page,
        source: &RowSource<'_>,
        wanted: &str,
        ctx: &mut StrategyContext<'_>,
    ) -> Result<Option<ClickTarget>, String> {
        let cached: Option<HashMap<String, usize>> = ctx.cache.get(ROWS_KEY);
        let Some(index) = cached.and_then(|rows| rows.get(wanted).copied()) else {
            return Ok(None);
        };

        let current = source.name_at(page, index).await?;
        if current.as_deref().map(normalize_name).as_deref() != Some(wanted) {
            debug!(
                channel = wanted,
                index,
                found = current.as_deref().unwrap_or(""),
                "Guide row moved since discovery, rediscovering"
            );
            ctx.cache.remove(ROWS_KEY);
            return Ok(None);
        }

        match source.center(page, index).await? {
            Some(center) => {
                debug!(channel = wanted, index, "Using cached guide row");
                Ok(Some(center))
            }
            None => {
                debug!(channel = wanted, index, "Cached guide row has no geometry");
                ctx.cache.remove(ROWS_KEY);
                Ok(None)
            }
        }
    }

    /// Read every row name, refresh the cache and resolve `name`.
    async fn discover(
        &self,
        page: &mut dyn Page,
        source: &RowSource<'_>,
        profile: &ProviderProfile,
        name: &str,
        wanted: &str,
        ctx: &mut StrategyContext<'_>,
    ) -> Result<ClickTarget, SelectorResult> {
        let names = source.names(page).await.map_err(SelectorResult::failure)?;

        let mut rows = HashMap::new();
        for (index, row_name) in names.iter().enumerate() {
            rows.entry(normalize_name(row_name)).or_insert(index);
        }
        if !rows.is_empty() {
            ctx.cache.insert(ROWS_KEY, &rows);
        }

        let Some(index) = rows.get(wanted).copied() else {
            ctx.log_available_channels(&AvailableChannels {
                provider: self.id(),
                selector: name,
                available: &names,
                preset_suffix: profile.preset_suffix.as_deref(),
                known_names: &profile.known_channels,
            });
            return Err(SelectorResult::failure(format!("channel '{}' not found in guide", name)));
        };

        source
            .center(page, index)
            .await
            .map_err(SelectorResult::failure)?
            .ok_or_else(|| {
                SelectorResult::failure(format!(
                    "guide row for '{}' has no renderable dimensions",
                    name
                ))
            })
    }
}

#[async_trait]
impl SelectionStrategy for GuideStrategy {
    fn id(&self) -> &'static str {
        "guide"
    }

    fn needs_image_readiness(&self) -> bool {
        false
    }

    async fn select(
        &self,
        page: &mut dyn Page,
        profile: &ProviderProfile,
        ctx: &mut StrategyContext<'_>,
    ) -> SelectorResult {
        let Some(name) = profile.selector_value() else {
            return SelectorResult::failure("guide channel not found: no selector");
        };
        let wanted = normalize_name(name);
        let source = RowSource::from_profile(profile);

        let cached = match Self::from_cache(page, &source, &wanted, ctx).await {
            Ok(cached) => cached,
            Err(reason) => return SelectorResult::failure(reason),
        };
        let target = match cached {
            Some(target) => target,
            None => match self.discover(page, &source, profile, name, &wanted, ctx).await {
                Ok(target) => target,
                Err(result) => return result,
            },
        };

        info!(channel = name, x = target.x, y = target.y, "Clicking guide row");
        if let Err(e) = click_target(page, target).await {
            return SelectorResult::failure(format!("failed to click guide row {}: {}", name, e));
        }

        match profile.confirm_selector_value() {
            Some(confirm) => run_confirmation(page, confirm, ctx.timeouts).await,
            None => SelectorResult::success(),
        }
    }
}
