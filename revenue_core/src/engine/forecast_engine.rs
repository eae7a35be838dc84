use tracing::{debug, info};

use super::report::ForecastReport;
use crate::common::forecast_error::ForecastError;
use crate::config::forecast_config::ForecastConfig;
use crate::forecast::forecast::forecast_forward;
use crate::math::{
    baseline::reconstruct_expectations,
    growth::compute_growth_factors,
    trend::current_trend,
};
use crate::observation::{observation::Observation, observation_set::ObservationSet};
use crate::timeline::timeline::Timeline;

/// Runs the forecast pipeline: timeline, growth rates, historical
/// expectations, current trend, forward forecast.
///
/// Stateless apart from its configuration; every call recomputes from scratch.
#[derive(Debug, Clone, Default)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Validate raw observations and run the pipeline.
    pub fn run_raw<I>(&self, observations: I) -> Result<ForecastReport, ForecastError>
    where
        I: IntoIterator,
        I::Item: Into<Observation>,
    {
        let set = ObservationSet::new(observations)?;
        Ok(self.run(&set))
    }

    pub fn run(&self, observations: &ObservationSet) -> ForecastReport {
        let timeline = compute_growth_factors(Timeline::build(observations));
        let mut timeline = reconstruct_expectations(
            timeline,
            self.config.trend_window,
            self.config.fallback_window,
        );

        let trend = current_trend(&timeline, self.config.trend_window);
        let forecast: Vec<_> = forecast_forward(
            &timeline,
            trend,
            self.config.horizon_months,
            self.config.fallback_window,
        )
        .iter()
        .collect();

        for point in &forecast {
            if let Some(row) = timeline.get_mut(point.period) {
                *row = *point;
            }
        }

        let last_observed = timeline.last_observation();
        match last_observed {
            Some(last) => info!(
                observations = observations.len(),
                months = timeline.len(),
                last = %last.period,
                trend,
                "forecast computed"
            ),
            None => debug!("no observations, empty forecast"),
        }

        ForecastReport {
            timeline,
            current_trend: trend,
            last_observed,
            forecast,
        }
    }
}
