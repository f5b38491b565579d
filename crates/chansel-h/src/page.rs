//! `Page` implementation over a live Chromium tab.
//!
//! Every query is answered by one evaluation of `query.js`, which takes the
//! serialized [`PageQuery`] and returns `{ "result": ... }`.

use async_trait::async_trait;
use chansel_common::{ClickTarget, Page, PageError, PageQuery};
use chromiumoxide::layout::Point;
use serde_json::Value;
use std::time::Duration;

const QUERY_JS: &str = include_str!("query.js");

/// Prevents hanging when a dialog blocks the JS thread.
const EVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum retries for context errors while the page is navigating.
const MAX_CONTEXT_RETRIES: u32 = 10;

const CONTEXT_RETRY_DELAY: Duration = Duration::from_millis(100);

fn is_context_error(err: &str) -> bool {
    err.contains("Cannot find context")
        || err.contains("Execution context was destroyed")
        || err.contains("-32000")
}

enum EvalError {
    Timeout,
    Context(String),
    Other(String),
}

#[derive(Clone)]
pub struct CdpPage {
    page: chromiumoxide::Page,
}

impl CdpPage {
    pub fn new(page: chromiumoxide::Page) -> Self {
        Self { page }
    }

    async fn evaluate_once(&self, expression: &str) -> Result<Value, EvalError> {
        let eval_result =
            tokio::time::timeout(EVAL_TIMEOUT, self.page.evaluate(expression)).await;

        match eval_result {
            Err(_) => Err(EvalError::Timeout),
            Ok(Err(e)) => {
                let err_str = e.to_string();
                if is_context_error(&err_str) {
                    Err(EvalError::Context(err_str))
                } else {
                    Err(EvalError::Other(err_str))
                }
            }
            Ok(Ok(remote_object)) => remote_object
                .into_value::<Value>()
                .map_err(|e| EvalError::Other(format!("Failed to get result: {}", e))),
        }
    }
}

pub(crate) fn build_expression(query: &PageQuery) -> Result<String, PageError> {
    let args = serde_json::to_string(query)?;
    Ok(format!("({})({})", QUERY_JS.trim(), args))
}

/// Unwrap the `{ "result": ... }` envelope; a missing key reads as `null`.
pub(crate) fn unwrap_envelope(query: &PageQuery, value: Value) -> Result<Value, PageError> {
    match value {
        Value::Object(mut map) => Ok(map.remove("result").unwrap_or(Value::Null)),
        other => Err(PageError::UnexpectedResult {
            query: query.name().to_string(),
            detail: format!("expected result envelope, got {}", other),
        }),
    }
}

#[async_trait]
impl Page for CdpPage {
    async fn evaluate(&mut self, query: &PageQuery) -> Result<Value, PageError> {
        let expression = build_expression(query)?;
        tracing::trace!(query = query.name(), "Evaluating page query");

        let mut last_error = None;

        for attempt in 0..MAX_CONTEXT_RETRIES {
            match self.evaluate_once(&expression).await {
                Ok(value) => return unwrap_envelope(query, value),
                Err(EvalError::Timeout) => {
                    return Err(PageError::Timeout {
                        operation: format!("{} (possibly blocked by a dialog)", query.name()),
                    });
                }
                Err(EvalError::Context(err_str)) => {
                    tracing::debug!(
                        "Context error during {} (attempt {}/{}), retrying...",
                        query.name(),
                        attempt + 1,
                        MAX_CONTEXT_RETRIES
                    );
                    last_error = Some(err_str);
                    tokio::time::sleep(CONTEXT_RETRY_DELAY).await;
                }
                Err(EvalError::Other(err_str)) => {
                    return Err(PageError::ScriptError(err_str));
                }
            }
        }

        Err(PageError::ScriptError(last_error.unwrap_or_else(|| {
            format!("{} failed after retries", query.name())
        })))
    }

    async fn mouse_click(&mut self, target: ClickTarget) -> Result<(), PageError> {
        self.page
            .click(Point::new(target.x, target.y))
            .await
            .map_err(|e| PageError::Input(e.to_string()))?;
        Ok(())
    }
}
