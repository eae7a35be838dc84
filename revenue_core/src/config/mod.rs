pub mod forecast_config;
