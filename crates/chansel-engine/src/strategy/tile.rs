//! Tile shelf / grid selection keyed by an image-URL slug.

use super::confirm::run_confirmation;
use super::{ProviderProfile, SelectionStrategy, StrategyContext};
use crate::primitives::click_target;
use async_trait::async_trait;
use chansel_common::page::{eval_list, eval_target};
use chansel_common::{AncestorInfo, ClickTarget, Page, PageQuery, SelectorResult};
use tracing::{debug, info};

/// Smallest box accepted for the pointer-cursor fallback.
pub const MIN_POINTER_TARGET: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileTier {
    /// Anchor, button, `role="button"` or `onclick`.
    Semantic,
    /// Nearest ancestor with `cursor: pointer`.
    PointerCursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileChoice {
    /// Index into the ancestor chain (0 = the image's parent).
    pub depth: usize,
    pub tier: TileTier,
}

/// Clickable ancestors of a tile image in the order they should be tried.
///
/// Every semantic clickable with area comes first, nearest first. Pointer
/// cursor ancestors of at least 20x20 follow, also nearest first.
pub fn tile_candidates(chain: &[AncestorInfo]) -> Vec<TileChoice> {
    let semantic = chain
        .iter()
        .enumerate()
        .filter(|(_, info)| info.is_semantic_clickable() && info.has_area())
        .map(|(depth, _)| TileChoice {
            depth,
            tier: TileTier::Semantic,
        });

    let pointer = chain
        .iter()
        .enumerate()
        .filter(|(_, info)| {
            !info.is_semantic_clickable()
                && info.has_pointer_cursor()
                && info.width >= MIN_POINTER_TARGET
                && info.height >= MIN_POINTER_TARGET
        })
        .map(|(depth, _)| TileChoice {
            depth,
            tier: TileTier::PointerCursor,
        });

    semantic.chain(pointer).collect()
}

#[derive(Debug, Default)]
pub struct TileStrategy;

impl TileStrategy {
    pub fn new() -> Self {
        Self
    }

    /// Locate phase: find the tile for `slug` and return its on-screen
    /// center after scrolling it into view.
    pub async fn locate(
        &self,
        page: &mut dyn Page,
        slug: &str,
    ) -> Result<Option<(ClickTarget, TileTier)>, String> {
        let chain: Option<Vec<AncestorInfo>> = eval_list(
            page,
            &PageQuery::TileAncestors {
                slug: slug.to_string(),
            },
        )
        .await
        .map_err(|e| format!("tile lookup failed: {}", e))?;

        let Some(chain) = chain else {
            debug!(slug, "No laid-out image matches slug");
            return Ok(None);
        };

        let candidates = tile_candidates(&chain);
        if candidates.is_empty() {
            debug!(slug, ancestors = chain.len(), "No clickable ancestor for tile image");
            return Ok(None);
        }

        // A candidate with no area once scrolled into view yields to the next.
        for choice in candidates {
            let target = eval_target(
                page,
                &PageQuery::TileAncestorCenter {
                    slug: slug.to_string(),
                    depth: choice.depth,
                },
            )
            .await
            .map_err(|e| format!("tile lookup failed: {}", e))?;

            match target {
                Some(target) => return Ok(Some((target, choice.tier))),
                None => debug!(
                    slug,
                    depth = choice.depth,
                    tier = ?choice.tier,
                    "Tile candidate has no area after scrolling, trying next"
                ),
            }
        }

        Ok(None)
    }
}

#[async_trait]
impl SelectionStrategy for TileStrategy {
    fn id(&self) -> &'static str {
        "tile"
    }

    async fn select(
        &self,
        page: &mut dyn Page,
        profile: &ProviderProfile,
        ctx: &mut StrategyContext<'_>,
    ) -> SelectorResult {
        let Some(slug) = profile.selector_value() else {
            return SelectorResult::failure("tile not found: no selector");
        };

        let (target, tier) = match self.locate(page, slug).await {
            Ok(Some(found)) => found,
            Ok(None) => return SelectorResult::failure(format!("tile not found: {}", slug)),
            Err(reason) => return SelectorResult::failure(reason),
        };

        info!(
            slug,
            tier = ?tier,
            x = target.x,
            y = target.y,
            "Clicking channel tile"
        );
        if let Err(e) = click_target(page, target).await {
            return SelectorResult::failure(format!("failed to click tile {}: {}", slug, e));
        }

        match profile.confirm_selector_value() {
            Some(confirm) => run_confirmation(page, confirm, ctx.timeouts).await,
            None => SelectorResult::success(),
        }
    }
}
