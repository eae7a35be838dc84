use serde::{Deserialize, Serialize};

use crate::common::{enums::Status, month::Month};

/// One month of the derived timeline.
///
/// Every field that depends on history is optional; `None` means the data
/// needed to compute it does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub period: Month,
    pub observed_amount: Option<f64>,
    /// Observation at exactly `period - 12 months`
    pub prior_year_amount: Option<f64>,
    /// `observed / prior_year - 1`
    pub growth_rate: Option<f64>,
    pub trend_estimate: Option<f64>,
    pub expected_amount: Option<f64>,
    pub status: Status,
}

impl DerivedPoint {
    pub fn new(period: Month, observed_amount: Option<f64>) -> Self {
        Self {
            period,
            observed_amount,
            prior_year_amount: None,
            growth_rate: None,
            trend_estimate: None,
            expected_amount: None,
            status: Status::Undetermined,
        }
    }

    pub fn is_observed(&self) -> bool {
        self.observed_amount.is_some()
    }
}
