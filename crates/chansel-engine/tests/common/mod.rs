#![allow(dead_code)]

use async_trait::async_trait;
use chansel_common::{AncestorInfo, ClickTarget, Page, PageError, PageQuery};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Scripted page: answers each query from fixed fields and records every
/// evaluation and click.
#[derive(Debug, Default)]
pub struct MockPage {
    pub image_ready: bool,
    pub ancestors: Option<Vec<AncestorInfo>>,
    pub tile_center: Option<ClickTarget>,
    /// Per-depth centers; when set, depths missing here read as `null`.
    pub tile_centers_by_depth: Option<HashMap<usize, ClickTarget>>,
    /// Whether the confirmation element ever shows up.
    pub confirm_present: bool,
    /// One entry consumed per confirmation center read; `None` or an empty
    /// queue reads as "element gone".
    pub confirm_centers: VecDeque<Option<ClickTarget>>,
    /// Confirmation element reports hidden once this many clicks (tile
    /// click included) have landed. `None` keeps it visible forever.
    pub hide_confirm_after_clicks: Option<usize>,
    pub guide_rows: Option<Vec<String>>,
    pub row_centers: HashMap<usize, ClickTarget>,
    pub fail_queries: bool,
    pub evaluations: Vec<PageQuery>,
    pub clicks: Vec<ClickTarget>,
}

pub const TILE_CENTER: ClickTarget = ClickTarget { x: 320.0, y: 180.0 };

pub fn node(tag: &str, width: f64, height: f64) -> AncestorInfo {
    AncestorInfo {
        tag: tag.to_string(),
        role: None,
        has_onclick: false,
        cursor: None,
        width,
        height,
    }
}

impl MockPage {
    /// A loaded tile: `<a>` two levels above the image.
    pub fn with_tile() -> Self {
        Self {
            image_ready: true,
            ancestors: Some(vec![
                node("div", 160.0, 90.0),
                node("a", 160.0, 90.0),
                node("body", 1280.0, 720.0),
            ]),
            tile_center: Some(TILE_CENTER),
            ..Self::default()
        }
    }

    pub fn with_guide(rows: &[&str]) -> Self {
        let row_centers = (0..rows.len())
            .map(|i| (i, ClickTarget::new(200.0, 100.0 + 40.0 * i as f64)))
            .collect();
        Self {
            guide_rows: Some(rows.iter().map(|s| s.to_string()).collect()),
            row_centers,
            ..Self::default()
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.evaluations.iter().filter(|q| q.name() == name).count()
    }

    fn confirm_visible(&self) -> bool {
        self.confirm_present
            && self
                .hide_confirm_after_clicks
                .is_none_or(|n| self.clicks.len() < n)
    }
}

fn point(target: Option<ClickTarget>) -> Value {
    match target {
        Some(t) => json!({"x": t.x, "y": t.y}),
        None => Value::Null,
    }
}

#[async_trait]
impl Page for MockPage {
    async fn evaluate(&mut self, query: &PageQuery) -> Result<Value, PageError> {
        self.evaluations.push(query.clone());
        if self.fail_queries {
            return Err(PageError::ScriptError("Execution context was destroyed".into()));
        }

        Ok(match query {
            PageQuery::ImageReady { .. } => json!(self.image_ready),
            PageQuery::TileAncestors { .. } => match &self.ancestors {
                Some(chain) => serde_json::to_value(chain)?,
                None => Value::Null,
            },
            PageQuery::TileAncestorCenter { depth, .. } => match &self.tile_centers_by_depth {
                Some(by_depth) => point(by_depth.get(depth).copied()),
                None => point(self.tile_center),
            },
            PageQuery::ElementVisible { .. } => json!(self.confirm_visible()),
            PageQuery::ElementCenter { .. } => {
                if self.confirm_visible() {
                    point(self.confirm_centers.pop_front().flatten())
                } else {
                    Value::Null
                }
            }
            PageQuery::GuideRowNames { .. } => match &self.guide_rows {
                Some(rows) => json!(rows),
                None => Value::Null,
            },
            PageQuery::GuideRowName { index, .. } => self
                .guide_rows
                .as_ref()
                .and_then(|rows| rows.get(*index))
                .map_or(Value::Null, |name| json!(name)),
            PageQuery::GuideRowCenter { index, .. } => {
                point(self.row_centers.get(index).copied())
            }
        })
    }

    async fn mouse_click(&mut self, target: ClickTarget) -> Result<(), PageError> {
        self.clicks.push(target);
        Ok(())
    }
}

/// Counts WARN events seen by the subscriber it is installed in.
#[derive(Clone, Default)]
pub struct WarnCounter(pub Arc<AtomicUsize>);

impl WarnCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}
