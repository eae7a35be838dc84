use crate::common::month::Month;
use crate::timeline::timeline::Timeline;

/// Sum of observed amounts over months in `(start, end]`.
///
/// Returns 0 when `start >= end`.
pub fn aggregate_period(timeline: &Timeline, start: Month, end: Month) -> f64 {
    if start >= end {
        return 0.0;
    }
    timeline
        .iter()
        .filter(|p| p.period > start && p.period <= end)
        .filter_map(|p| p.observed_amount)
        .sum()
}

/// Relative change `current / previous - 1`.
///
/// `None` unless `previous` is strictly positive.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous > 0.0 && previous.is_finite() {
        Some(current / previous - 1.0)
    } else {
        None
    }
}
