use tracing::warn;

use crate::common::{month::Month, utils::mean};
use crate::config::forecast_config::YEAR_LAG;
use crate::timeline::{derived_point::DerivedPoint, timeline::Timeline};

/// Forward projection over the months after the last observation.
///
/// Points are produced on demand; [`Forecast::iter`] can be called any number
/// of times and always yields the same `horizon` points in month order.
#[derive(Debug, Clone, Copy)]
pub struct Forecast<'a> {
    timeline: &'a Timeline,
    first: Option<Month>,
    trend: f64,
    horizon: usize,
    fallback: Option<f64>,
}

impl<'a> Forecast<'a> {
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Mean of the last observed amounts, used where a month has no anchor
    pub fn fallback(&self) -> Option<f64> {
        self.fallback
    }

    pub fn len(&self) -> usize {
        if self.first.is_some() {
            self.horizon
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> ForecastIter<'a> {
        ForecastIter {
            forecast: *self,
            step: 0,
        }
    }

    fn point(&self, month: Month) -> DerivedPoint {
        let prior = self.timeline.observed_at(month.sub_months(YEAR_LAG));
        let expected = match prior {
            Some(prior) => Some(prior * (1.0 + self.trend)),
            None => self.fallback,
        };

        let mut point = DerivedPoint::new(month, None);
        point.prior_year_amount = prior;
        point.trend_estimate = Some(self.trend);
        point.expected_amount = expected;
        point
    }
}

impl<'a> IntoIterator for &Forecast<'a> {
    type Item = DerivedPoint;
    type IntoIter = ForecastIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ForecastIter<'a> {
    forecast: Forecast<'a>,
    step: usize,
}

impl Iterator for ForecastIter<'_> {
    type Item = DerivedPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.forecast.len() {
            return None;
        }
        let first = self.forecast.first?;
        let point = self.forecast.point(first.add_months(self.step as i32));
        self.step += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.forecast.len().saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ForecastIter<'_> {}

/// Project `horizon` months past the last observation of `timeline`.
///
/// Each month uses its observation from exactly 12 months earlier grown by
/// `current_trend`; without one it takes the mean of the last
/// `fallback_window` observed amounts. Forecast values never feed other
/// forecast values.
pub fn forecast_forward(
    timeline: &Timeline,
    current_trend: f64,
    horizon: usize,
    fallback_window: usize,
) -> Forecast<'_> {
    let first = timeline.last_observed_month().map(|m| m.next());
    let fallback = first.and_then(|f| mean(&timeline.observed_before(f, fallback_window)));

    if let Some(first) = first {
        let unanchored = (0..horizon)
            .map(|i| first.add_months(i as i32))
            .filter(|m| timeline.observed_at(m.sub_months(YEAR_LAG)).is_none())
            .count();
        if unanchored > 0 {
            warn!(
                unanchored,
                horizon,
                fallback = fallback.unwrap_or_default(),
                "forecast months without a prior-year observation use the trailing mean"
            );
        }
    }

    Forecast {
        timeline,
        first,
        trend: current_trend,
        horizon,
        fallback,
    }
}
