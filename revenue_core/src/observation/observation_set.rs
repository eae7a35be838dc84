use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use super::observation::Observation;
use crate::common::{
    forecast_error::{ErrCode, ForecastError},
    month::Month,
};

/// Validated observations keyed by calendar month, at most one per month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    by_month: BTreeMap<Month, f64>,
}

impl ObservationSet {
    /// Build from observations in any order.
    ///
    /// A repeated month or a negative/non-finite amount is rejected.
    pub fn new<I>(observations: I) -> Result<Self, ForecastError>
    where
        I: IntoIterator,
        I::Item: Into<Observation>,
    {
        let mut by_month = BTreeMap::new();
        for obs in observations {
            let obs: Observation = obs.into();
            if !obs.amount.is_finite() || obs.amount < 0.0 {
                return Err(ForecastError::new(
                    format!("{} amount={} is not a non-negative number", obs.period, obs.amount),
                    ErrCode::InvalidAmount,
                ));
            }
            match by_month.entry(obs.period) {
                Entry::Occupied(existing) => {
                    return Err(ForecastError::new(
                        format!(
                            "{} appears twice (amounts {} and {})",
                            obs.period,
                            existing.get(),
                            obs.amount
                        ),
                        ErrCode::DuplicatePeriod,
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(obs.amount);
                }
            }
        }
        Ok(Self { by_month })
    }

    pub fn len(&self) -> usize {
        self.by_month.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_month.is_empty()
    }

    /// Amount observed at exactly `month`
    pub fn get(&self, month: Month) -> Option<f64> {
        self.by_month.get(&month).copied()
    }

    pub fn first(&self) -> Option<Observation> {
        self.by_month
            .iter()
            .next()
            .map(|(m, a)| Observation::new(*m, *a))
    }

    pub fn last(&self) -> Option<Observation> {
        self.by_month
            .iter()
            .next_back()
            .map(|(m, a)| Observation::new(*m, *a))
    }

    /// Observations in chronological order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Observation> + '_ {
        self.by_month.iter().map(|(m, a)| Observation::new(*m, *a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(y: i32, mo: u32) -> Month {
        Month::new(y, mo).unwrap()
    }

    #[test]
    fn test_sorts_input() {
        let set = ObservationSet::new(vec![
            (m(2024, 3), 30.0),
            (m(2024, 1), 10.0),
            (m(2024, 2), 20.0),
        ])
        .unwrap();
        let months: Vec<_> = set.iter().map(|o| o.period).collect();
        assert_eq!(months, vec![m(2024, 1), m(2024, 2), m(2024, 3)]);
        assert_eq!(set.first().unwrap().amount, 10.0);
        assert_eq!(set.last().unwrap().amount, 30.0);
    }

    #[test]
    fn test_duplicate_month_fails() {
        let err = ObservationSet::new(vec![(m(2024, 1), 10.0), (m(2024, 1), 12.0)]).unwrap_err();
        assert_eq!(err.errcode, ErrCode::DuplicatePeriod);
    }

    #[test]
    fn test_invalid_amounts_fail() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = ObservationSet::new(vec![(m(2024, 1), bad)]).unwrap_err();
            assert_eq!(err.errcode, ErrCode::InvalidAmount);
        }
        assert!(ObservationSet::new(vec![(m(2024, 1), 0.0)]).is_ok());
    }

    #[test]
    fn test_empty() {
        let set = ObservationSet::new(Vec::<Observation>::new()).unwrap();
        assert!(set.is_empty());
        assert!(set.first().is_none());
    }
}
