use tracing::debug;

use crate::common::{month::Month, utils::mean};
use crate::timeline::timeline::Timeline;

/// Trend returned when no growth rate is available
pub const NEUTRAL_TREND: f64 = 0.0;

/// Mean growth rate of the `window` most recent months strictly before `as_of`
/// that have one.
///
/// Months without a rate are skipped, not counted as zero. With fewer than
/// `window` rates the available ones are averaged; with none the result is
/// [`NEUTRAL_TREND`].
pub fn estimate_trend(timeline: &Timeline, as_of: Month, window: usize) -> f64 {
    let mut rates: Vec<f64> = timeline
        .before(as_of)
        .iter()
        .rev()
        .filter_map(|p| p.growth_rate)
        .take(window)
        .collect();
    rates.reverse();
    mean(&rates).unwrap_or(NEUTRAL_TREND)
}

/// Trend used to rebuild the expectation of a past month; excludes the month itself.
pub fn historical_trend(timeline: &Timeline, month: Month, window: usize) -> f64 {
    estimate_trend(timeline, month, window)
}

/// Trend as of the last observation, including its own rate.
///
/// Computed once per run and applied to every forecast month.
pub fn current_trend(timeline: &Timeline, window: usize) -> f64 {
    let Some(last) = timeline.last_observed_month() else {
        return NEUTRAL_TREND;
    };
    let trend = estimate_trend(timeline, last.next(), window);
    debug!(%last, window, trend, "current trend");
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::growth::compute_growth_factors;
    use crate::observation::observation_set::ObservationSet;

    fn m(y: i32, mo: u32) -> Month {
        Month::new(y, mo).unwrap()
    }

    /// 12 months at 100, then months whose growth rate is `rates[i]`
    fn series(rates: &[f64]) -> Timeline {
        let start = m(2022, 1);
        let mut obs: Vec<(Month, f64)> = (0..12).map(|i| (start.add_months(i), 100.0)).collect();
        for (i, r) in rates.iter().enumerate() {
            obs.push((start.add_months(12 + i as i32), 100.0 * (1.0 + r)));
        }
        compute_growth_factors(Timeline::build(&ObservationSet::new(obs).unwrap()))
    }

    #[test]
    fn test_takes_exactly_window_rates_before_as_of() {
        let rates = [0.01, 0.02, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08];
        let tl = series(&rates);
        // as_of = 8th growth month (index 7) -> uses rates[1..7]
        let as_of = m(2023, 8);
        let expected = rates[1..7].iter().sum::<f64>() / 6.0;
        assert!((estimate_trend(&tl, as_of, 6) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_fewer_than_window_averages_available() {
        let tl = series(&[0.10, 0.20]);
        let trend = estimate_trend(&tl, m(2024, 1), 6);
        assert!((trend - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_no_rates_is_neutral() {
        let tl = series(&[]);
        assert_eq!(estimate_trend(&tl, m(2023, 1), 6), NEUTRAL_TREND);
        assert_eq!(current_trend(&tl, 6), NEUTRAL_TREND);
        assert_eq!(current_trend(&Timeline::default(), 6), NEUTRAL_TREND);
    }

    #[test]
    fn test_historical_excludes_own_month() {
        let tl = series(&[0.10, 0.50]);
        // month of the 0.50 rate only sees 0.10
        let trend = historical_trend(&tl, m(2023, 2), 6);
        assert!((trend - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_current_includes_last_month() {
        let tl = series(&[0.10, 0.50]);
        assert!((current_trend(&tl, 6) - 0.30).abs() < 1e-12);
        assert!((current_trend(&tl, 1) - 0.50).abs() < 1e-12);
    }

    #[test]
    fn test_gaps_are_skipped_not_zero_padded() {
        let start = m(2022, 1);
        let mut obs: Vec<(Month, f64)> = (0..12).map(|i| (start.add_months(i), 100.0)).collect();
        // growth months with a hole in between
        obs.push((m(2023, 1), 120.0));
        obs.push((m(2023, 5), 140.0));
        let tl = compute_growth_factors(Timeline::build(&ObservationSet::new(obs).unwrap()));
        let trend = estimate_trend(&tl, m(2023, 6), 6);
        assert!((trend - 0.30).abs() < 1e-12);
    }
}
