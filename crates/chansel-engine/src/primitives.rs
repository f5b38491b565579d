//! Shared page primitives used by the coordinator and every strategy.

use chansel_common::page::eval_flag;
use chansel_common::{ClickTarget, Page, PageError, PageQuery};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

pub use chansel_common::normalize_name;

/// Pause before each click so scroll, animation and lazy-load can settle.
pub const CLICK_SETTLE_DELAY: Duration = Duration::from_millis(200);

/// How long a clicked confirmation element gets to disappear.
pub const VERIFY_TIMEOUT: Duration = Duration::from_millis(3000);

/// Interval between polls of a boolean page condition.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait for the settle delay, then dispatch one mouse click.
///
/// Reports that the click was sent, not that it did anything. The target
/// must already be scrolled into view.
pub async fn click_target(page: &mut dyn Page, target: ClickTarget) -> Result<(), PageError> {
    sleep(CLICK_SETTLE_DELAY).await;
    debug!("Clicking at ({:.1}, {:.1})", target.x, target.y);
    page.mouse_click(target).await
}

/// Poll a boolean query until it reads `expected` or `timeout` elapses.
///
/// Evaluation errors count as "not yet". Returns whether the condition was
/// observed in time.
pub async fn wait_for_flag(
    page: &mut dyn Page,
    query: &PageQuery,
    expected: bool,
    timeout: Duration,
) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        match eval_flag(page, query).await {
            Ok(value) if value == expected => return true,
            Ok(_) => {}
            Err(e) => debug!("{} poll failed (treated as not yet): {}", query.name(), e),
        }

        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        sleep(POLL_INTERVAL.min(deadline - now)).await;
    }
}
