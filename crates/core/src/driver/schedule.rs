//! Request scheduling helpers: query dates and batch sizes

use chrono::{Days, NaiveDate};
use gabench_domain::{GaBenchError, Result};

/// Query date for the `index`-th request (1-based).
///
/// When walking back, request N targets `start - (N - 1)` days; otherwise
/// every request targets `start`.
///
/// # Errors
/// Returns `GaBenchError::InvalidInput` if the walk leaves the representable
/// date range.
pub fn date_for_request(start: NaiveDate, index: usize, walk_back: bool) -> Result<NaiveDate> {
    if !walk_back {
        return Ok(start);
    }

    let offset = index.saturating_sub(1) as u64;
    start.checked_sub_days(Days::new(offset)).ok_or_else(|| {
        GaBenchError::InvalidInput(format!("cannot step {offset} days back from {start}"))
    })
}

/// Sizes of the batches needed to issue `count` requests `width` at a time.
///
/// Every batch is `width` wide except a trailing partial one.
pub fn batch_sizes(count: usize, width: usize) -> impl Iterator<Item = usize> {
    let width = width.max(1);
    (0..count).step_by(width).map(move |offset| width.min(count - offset))
}
