pub mod aggregate;
pub mod baseline;
pub mod classify;
pub mod growth;
pub mod trend;
