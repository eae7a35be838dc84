use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Label comparing an observed month against its expected amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Status {
    #[strum(serialize = "above")]
    Above,
    #[strum(serialize = "below")]
    Below,
    #[strum(serialize = "undetermined")]
    Undetermined,
}

impl Status {
    /// Observed at or above expectation; ties count as above.
    pub fn is_above(&self) -> bool {
        matches!(self, Status::Above)
    }

    pub fn is_determined(&self) -> bool {
        !matches!(self, Status::Undetermined)
    }
}

/// Lookback window for period summaries, counted back from the last observed month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Lookback {
    #[strum(serialize = "1y")]
    OneYear,
    #[strum(serialize = "2y")]
    TwoYears,
    #[strum(serialize = "3y")]
    ThreeYears,
    #[strum(serialize = "all")]
    AllTime,
}

impl Lookback {
    /// Whole years covered, `None` for the full history.
    pub fn years(&self) -> Option<i32> {
        match self {
            Lookback::OneYear => Some(1),
            Lookback::TwoYears => Some(2),
            Lookback::ThreeYears => Some(3),
            Lookback::AllTime => None,
        }
    }
}
