use serde::Serialize;

use crate::common::{
    enums::{Lookback, Status},
    month::Month,
};
use crate::config::forecast_config::YEAR_LAG;
use crate::math::aggregate::{aggregate_period, percent_change};
use crate::observation::observation::Observation;
use crate::timeline::{derived_point::DerivedPoint, timeline::Timeline};

/// Everything the presentation layer needs from one engine run
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub timeline: Timeline,
    pub current_trend: f64,
    pub last_observed: Option<Observation>,
    pub forecast: Vec<DerivedPoint>,
}

/// Totals for a lookback window and the window before it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub lookback: Lookback,
    /// Exclusive lower bound
    pub start: Month,
    /// Inclusive upper bound, the last observed month
    pub end: Month,
    pub total: f64,
    pub previous_total: Option<f64>,
    pub change: Option<f64>,
}

impl ForecastReport {
    /// Observed months with their status, oldest first
    pub fn classifications(&self) -> impl Iterator<Item = (Month, Status)> + '_ {
        self.timeline
            .history()
            .iter()
            .filter(|p| p.is_observed())
            .map(|p| (p.period, p.status))
    }

    pub fn aggregate(&self, start: Month, end: Month) -> f64 {
        aggregate_period(&self.timeline, start, end)
    }

    /// Totals for `lookback` against the preceding window of the same length.
    ///
    /// `None` without observations. `AllTime` has no preceding window.
    pub fn summarize(&self, lookback: Lookback) -> Option<PeriodSummary> {
        let end = self.last_observed?.period;

        let Some(years) = lookback.years() else {
            let start = self.timeline.first_month()?.sub_months(1);
            return Some(PeriodSummary {
                lookback,
                start,
                end,
                total: self.aggregate(start, end),
                previous_total: None,
                change: None,
            });
        };

        let span = years * YEAR_LAG;
        let start = end.sub_months(span);
        let previous_start = start.sub_months(span);
        let total = self.aggregate(start, end);

        let has_previous = self
            .timeline
            .iter()
            .any(|p| p.period > previous_start && p.period <= start && p.is_observed());
        let previous_total = has_previous.then(|| self.aggregate(previous_start, start));
        let change = previous_total.and_then(|prev| percent_change(total, prev));

        Some(PeriodSummary {
            lookback,
            start,
            end,
            total,
            previous_total,
            change,
        })
    }
}
