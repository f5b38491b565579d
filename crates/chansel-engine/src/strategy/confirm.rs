//! Click-and-verify loop for a secondary confirmation element.
//!
//! Coordinate clicks on animated players miss silently now and then, so
//! success is only reported once the element has left the page.

use crate::config::TimeoutConfig;
use crate::primitives::{VERIFY_TIMEOUT, click_target, wait_for_flag};
use chansel_common::page::eval_target;
use chansel_common::{Page, PageQuery, SelectorResult};
use tracing::{debug, info, warn};

/// Click + verify cycles before giving up.
pub const CONFIRM_ATTEMPTS: usize = 3;

pub async fn run_confirmation(
    page: &mut dyn Page,
    selector: &str,
    timeouts: &TimeoutConfig,
) -> SelectorResult {
    let visible = PageQuery::ElementVisible {
        selector: selector.to_string(),
    };
    let center = PageQuery::ElementCenter {
        selector: selector.to_string(),
    };

    if !wait_for_flag(page, &visible, true, timeouts.confirm()).await {
        warn!(selector, "Confirmation element never appeared");
        return SelectorResult::failure(format!(
            "confirmation element never appeared: {}",
            selector
        ));
    }

    for attempt in 0..CONFIRM_ATTEMPTS {
        let target = match eval_target(page, &center).await {
            Ok(target) => target,
            Err(e) => {
                return SelectorResult::failure(format!(
                    "failed to read confirmation element {}: {}",
                    selector, e
                ));
            }
        };

        let Some(target) = target else {
            if attempt > 0 {
                // Gone before this read: most likely the previous click worked
                // and the view transition removed it. Approximation only.
                debug!(
                    selector,
                    attempt = attempt + 1,
                    "Confirmation element vanished after previous click, assuming success"
                );
                return SelectorResult::success();
            }
            return SelectorResult::failure(format!(
                "confirmation element {} found but has no renderable dimensions",
                selector
            ));
        };

        if let Err(e) = click_target(page, target).await {
            return SelectorResult::failure(format!(
                "failed to click confirmation element {}: {}",
                selector, e
            ));
        }

        if wait_for_flag(page, &visible, false, VERIFY_TIMEOUT).await {
            info!(selector, attempt = attempt + 1, "Confirmation click verified");
            return SelectorResult::success();
        }

        info!(
            selector,
            attempt = attempt + 1,
            max = CONFIRM_ATTEMPTS,
            "Confirmation element still present after click, retrying with fresh coordinates"
        );
    }

    SelectorResult::failure(format!(
        "confirmation element {} still present after {} attempts",
        selector, CONFIRM_ATTEMPTS
    ))
}
