pub mod forecast_engine;
pub mod report;
