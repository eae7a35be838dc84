use crate::common::utils::mean;
use crate::math::{classify::classify, trend::historical_trend};
use crate::timeline::timeline::Timeline;

/// Rebuild the expected amount and status of every month up to the last observation.
///
/// Month P is judged only on information from before P: its trend comes from
/// [`historical_trend`], and without a prior-year anchor it falls back to the
/// mean of the last `fallback_window` amounts observed before P.
pub fn reconstruct_expectations(
    mut timeline: Timeline,
    trend_window: usize,
    fallback_window: usize,
) -> Timeline {
    let history_len = timeline.history().len();

    for idx in 0..history_len {
        let point = timeline.points[idx];
        let trend = historical_trend(&timeline, point.period, trend_window);
        let expected = match point.prior_year_amount {
            Some(prior) => Some(prior * (1.0 + trend)),
            None => mean(&timeline.observed_before(point.period, fallback_window)),
        };

        let point = &mut timeline.points[idx];
        point.trend_estimate = Some(trend);
        point.expected_amount = expected;
        point.status = classify(point.observed_amount, expected);
    }
    timeline
}
