use serde::{Deserialize, Serialize};

/// A viewport coordinate pair.
///
/// Never cached: layout can shift between reads, so a target is recomputed
/// right before every click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickTarget {
    pub x: f64,
    pub y: f64,
}

impl ClickTarget {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outcome of a channel selection call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SelectorResult {
    Success,
    Failure { reason: String },
}

impl SelectorResult {
    pub fn success() -> Self {
        SelectorResult::Success
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        SelectorResult::Failure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SelectorResult::Success)
    }

    /// The failure reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            SelectorResult::Success => None,
            SelectorResult::Failure { reason } => Some(reason),
        }
    }
}

impl std::fmt::Display for SelectorResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorResult::Success => write!(f, "success"),
            SelectorResult::Failure { reason } => write!(f, "failure: {}", reason),
        }
    }
}

/// A typed query evaluated against the live document.
///
/// The serialized form (`{"query": "...", ...}`) is the argument handed to
/// the page-side script, so every field must stay JSON friendly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum PageQuery {
    /// `true` once any `<img>` whose `src` contains `slug` is complete and
    /// has a positive natural width.
    ImageReady { slug: String },

    /// Ancestor chain (parent first) of the first visible `<img>` whose
    /// `src` contains `slug`, as a list of [`AncestorInfo`]. `null` when no
    /// such image is laid out.
    TileAncestors { slug: String },

    /// Scroll the ancestor at `depth` (0 = the image's parent) into view and
    /// return its center, or `null` if it has no area.
    TileAncestorCenter { slug: String, depth: usize },

    /// Center of the first element matching `selector` after scrolling it
    /// into view, or `null` when absent or zero-sized.
    ElementCenter { selector: String },

    /// Whether an element matching `selector` exists and is rendered.
    ElementVisible { selector: String },

    /// Display names of every guide row matching `row_selector`, in
    /// document order.
    GuideRowNames {
        row_selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name_attribute: Option<String>,
    },

    /// Display name of the guide row at `index`, read the same way as
    /// `GuideRowNames`. `null` when no row sits at that index.
    GuideRowName {
        row_selector: String,
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name_attribute: Option<String>,
    },

    /// Center of the guide row at `index` after scrolling it into view.
    GuideRowCenter { row_selector: String, index: usize },
}

impl PageQuery {
    /// Short name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PageQuery::ImageReady { .. } => "image_ready",
            PageQuery::TileAncestors { .. } => "tile_ancestors",
            PageQuery::TileAncestorCenter { .. } => "tile_ancestor_center",
            PageQuery::ElementCenter { .. } => "element_center",
            PageQuery::ElementVisible { .. } => "element_visible",
            PageQuery::GuideRowNames { .. } => "guide_row_names",
            PageQuery::GuideRowName { .. } => "guide_row_name",
            PageQuery::GuideRowCenter { .. } => "guide_row_center",
        }
    }
}

/// One ancestor of a matched tile image, as reported by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestorInfo {
    /// Lowercase tag name.
    pub tag: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Element carries an `onclick` attribute.
    #[serde(default)]
    pub has_onclick: bool,
    /// Computed `cursor` style.
    #[serde(default)]
    pub cursor: Option<String>,
    pub width: f64,
    pub height: f64,
}

impl AncestorInfo {
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Anchor, button, explicit button role, or native click handler.
    pub fn is_semantic_clickable(&self) -> bool {
        matches!(self.tag.as_str(), "a" | "button")
            || self.role.as_deref() == Some("button")
            || self.has_onclick
    }

    pub fn has_pointer_cursor(&self) -> bool {
        self.cursor.as_deref() == Some("pointer")
    }
}
