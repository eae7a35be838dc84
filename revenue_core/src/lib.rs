pub mod common;
pub mod config;
pub mod engine;
pub mod forecast;
pub mod math;
pub mod observation;
pub mod timeline;

pub use common::enums::{Lookback, Status};
pub use common::forecast_error::{ErrCode, ForecastError};
pub use common::month::Month;
pub use config::forecast_config::ForecastConfig;
pub use engine::forecast_engine::ForecastEngine;
pub use engine::report::{ForecastReport, PeriodSummary};
pub use observation::{observation::Observation, observation_set::ObservationSet};
pub use timeline::{derived_point::DerivedPoint, timeline::Timeline};
