use serde::{Deserialize, Serialize};

use crate::common::month::Month;

/// One month of recorded revenue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period: Month,
    pub amount: f64,
}

impl Observation {
    pub fn new(period: Month, amount: f64) -> Self {
        Self { period, amount }
    }
}

impl From<(Month, f64)> for Observation {
    fn from((period, amount): (Month, f64)) -> Self {
        Self { period, amount }
    }
}
