//! Batch window padding

use std::time::Duration;

/// Sleep needed for a batch that took `elapsed` to fill `window`.
///
/// Returns `None` once the batch alone has used up the window.
pub fn batch_padding(elapsed: Duration, window: Duration) -> Option<Duration> {
    window.checked_sub(elapsed).filter(|remaining| !remaining.is_zero())
}
