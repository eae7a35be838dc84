use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;

use crate::common::forecast_error::{ErrCode, ForecastError};

/// Months between a period and its year-over-year anchor
pub const YEAR_LAG: i32 = 12;

/// Forecast engine configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastConfig {
    /// Growth rates averaged into one trend estimate
    pub trend_window: usize,
    /// Months projected past the last observation
    pub horizon_months: usize,
    /// Observed amounts averaged when a month has no prior-year anchor
    pub fallback_window: usize,
}

impl ForecastConfig {
    pub fn new(conf: Option<HashMap<String, serde_json::Value>>) -> Result<Self, ForecastError> {
        let mut conf = ConfigWithCheck::new(conf.unwrap_or_default());

        let config = Self {
            trend_window: conf.get("trend_window")?.unwrap_or(6),
            horizon_months: conf.get("horizon_months")?.unwrap_or(12),
            fallback_window: conf.get("fallback_window")?.unwrap_or(6),
        };

        conf.check()?;
        config.validate()?;

        Ok(config)
    }

    pub fn with_trend_window(mut self, trend_window: usize) -> Result<Self, ForecastError> {
        self.trend_window = trend_window;
        self.validate()?;
        Ok(self)
    }

    pub fn with_horizon(mut self, horizon_months: usize) -> Result<Self, ForecastError> {
        self.horizon_months = horizon_months;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ForecastError> {
        for (name, value) in [
            ("trend_window", self.trend_window),
            ("horizon_months", self.horizon_months),
            ("fallback_window", self.fallback_window),
        ] {
            if value == 0 {
                return Err(ForecastError::new(
                    format!("{} must be at least 1", name),
                    ErrCode::ParaError,
                ));
            }
        }
        Ok(())
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trend_window: 6,
            horizon_months: 12,
            fallback_window: 6,
        }
    }
}

/// Key/value configuration that remembers which keys were consumed
#[derive(Debug)]
pub struct ConfigWithCheck {
    conf: HashMap<String, serde_json::Value>,
}

impl ConfigWithCheck {
    pub fn new(conf: HashMap<String, serde_json::Value>) -> Self {
        Self { conf }
    }

    /// Take `key` out of the map and decode it.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Result<Option<T>, ForecastError> {
        match self.conf.remove(key) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                ForecastError::new(
                    format!("invalid value {} for {}: {}", value, key, e),
                    ErrCode::ConfigError,
                )
            }),
        }
    }

    /// Fail on any key nobody asked for.
    pub fn check(&self) -> Result<(), ForecastError> {
        let mut unknown: Vec<&String> = self.conf.keys().collect();
        if unknown.is_empty() {
            return Ok(());
        }
        unknown.sort();
        Err(ForecastError::new(
            format!("unknown para = {:?}", unknown),
            ErrCode::ParaError,
        ))
    }
}
