use crate::error::PageError;
use crate::protocol::{ClickTarget, PageQuery};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// The page evaluation boundary.
///
/// Implemented by the headless Chromium adapter and by test doubles. Each
/// call is one round trip to the live document; the caller guarantees only
/// one selection runs against a page at a time.
#[async_trait]
pub trait Page: Send {
    /// Evaluate a query in the page context and return its JSON result
    /// (a coordinate pair, a boolean, a list, or `null`).
    async fn evaluate(&mut self, query: &PageQuery) -> Result<Value, PageError>;

    /// Dispatch a single mouse click at a viewport coordinate.
    async fn mouse_click(&mut self, target: ClickTarget) -> Result<(), PageError>;
}

/// Evaluate a query whose result is a coordinate pair or `null`.
pub async fn eval_target(
    page: &mut dyn Page,
    query: &PageQuery,
) -> Result<Option<ClickTarget>, PageError> {
    let value = page.evaluate(query).await?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| unexpected(query, e.to_string()))
}

/// Evaluate a query whose result is a boolean. `null` reads as `false`.
pub async fn eval_flag(page: &mut dyn Page, query: &PageQuery) -> Result<bool, PageError> {
    match page.evaluate(query).await? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        other => Err(unexpected(query, format!("expected boolean, got {}", other))),
    }
}

/// Evaluate a query whose result is a string or `null`.
pub async fn eval_text(
    page: &mut dyn Page,
    query: &PageQuery,
) -> Result<Option<String>, PageError> {
    match page.evaluate(query).await? {
        Value::String(text) => Ok(Some(text)),
        Value::Null => Ok(None),
        other => Err(unexpected(query, format!("expected string, got {}", other))),
    }
}

/// Evaluate a query whose result is a list, or `null` when the page found
/// nothing to enumerate.
pub async fn eval_list<T: DeserializeOwned>(
    page: &mut dyn Page,
    query: &PageQuery,
) -> Result<Option<Vec<T>>, PageError> {
    let value = page.evaluate(query).await?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| unexpected(query, e.to_string()))
}

fn unexpected(query: &PageQuery, detail: String) -> PageError {
    PageError::UnexpectedResult {
        query: query.name().to_string(),
        detail,
    }
}
