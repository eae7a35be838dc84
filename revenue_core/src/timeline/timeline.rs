use serde::Serialize;
use std::ops::Index;

use super::derived_point::DerivedPoint;
use crate::common::month::Month;
use crate::config::forecast_config::YEAR_LAG;
use crate::observation::{observation::Observation, observation_set::ObservationSet};

/// Contiguous monthly timeline from the first observation through
/// `YEAR_LAG` months past the last one.
///
/// Months without an observation are present as rows with no observed amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Timeline {
    pub points: Vec<DerivedPoint>,
    last_observed: Option<Month>,
}

impl Timeline {
    /// Lay out the month grid for `observations`. Empty input gives an empty timeline.
    pub fn build(observations: &ObservationSet) -> Self {
        let (first, last) = match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => (first.period, last.period),
            _ => return Self::default(),
        };

        let points = first
            .range_inclusive(last.add_months(YEAR_LAG))
            .map(|month| DerivedPoint::new(month, observations.get(month)))
            .collect();

        Self {
            points,
            last_observed: Some(last),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_month(&self) -> Option<Month> {
        self.points.first().map(|p| p.period)
    }

    pub fn last_month(&self) -> Option<Month> {
        self.points.last().map(|p| p.period)
    }

    pub fn last_observed_month(&self) -> Option<Month> {
        self.last_observed
    }

    pub fn last_observation(&self) -> Option<Observation> {
        let month = self.last_observed?;
        let amount = self.observed_at(month)?;
        Some(Observation::new(month, amount))
    }

    /// Row position of `month`, computed from the calendar, not by scanning
    pub fn position(&self, month: Month) -> Option<usize> {
        let offset = self.first_month()?.months_until(&month);
        if offset < 0 || offset as usize >= self.points.len() {
            return None;
        }
        Some(offset as usize)
    }

    pub fn get(&self, month: Month) -> Option<&DerivedPoint> {
        let idx = self.position(month)?;
        self.points.get(idx)
    }

    pub fn get_mut(&mut self, month: Month) -> Option<&mut DerivedPoint> {
        let idx = self.position(month)?;
        self.points.get_mut(idx)
    }

    pub fn observed_at(&self, month: Month) -> Option<f64> {
        self.get(month).and_then(|p| p.observed_amount)
    }

    /// Rows strictly before `month`, oldest first
    pub fn before(&self, month: Month) -> &[DerivedPoint] {
        let Some(first) = self.first_month() else {
            return &[];
        };
        let offset = first.months_until(&month).clamp(0, self.points.len() as i64);
        &self.points[..offset as usize]
    }

    /// Rows up to and including the last observed month
    pub fn history(&self) -> &[DerivedPoint] {
        match self.last_observed {
            Some(last) => self.before(last.next()),
            None => &[],
        }
    }

    /// Rows after the last observed month
    pub fn future(&self) -> &[DerivedPoint] {
        &self.points[self.history().len()..]
    }

    /// Observed amounts of the last `n` observed rows strictly before `month`
    pub fn observed_before(&self, month: Month, n: usize) -> Vec<f64> {
        let mut amounts: Vec<f64> = self
            .before(month)
            .iter()
            .rev()
            .filter_map(|p| p.observed_amount)
            .take(n)
            .collect();
        amounts.reverse();
        amounts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DerivedPoint> {
        self.points.iter()
    }
}

impl Index<usize> for Timeline {
    type Output = DerivedPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a DerivedPoint;
    type IntoIter = std::slice::Iter<'a, DerivedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(y: i32, mo: u32) -> Month {
        Month::new(y, mo).unwrap()
    }

    fn set(pairs: &[(Month, f64)]) -> ObservationSet {
        ObservationSet::new(pairs.to_vec()).unwrap()
    }

    #[test]
    fn test_build_fills_gaps() {
        let tl = Timeline::build(&set(&[(m(2024, 3), 3.0), (m(2024, 1), 1.0)]));
        assert_eq!(tl.len(), 2 + 12 + 1);
        assert_eq!(tl.first_month(), Some(m(2024, 1)));
        assert_eq!(tl[1].period, m(2024, 2));
        assert_eq!(tl.last_month(), Some(m(2025, 3)));
        assert_eq!(tl.observed_at(m(2024, 2)), None);
        assert!(tl.get(m(2024, 2)).is_some());
        assert_eq!(tl.observed_at(m(2024, 3)), Some(3.0));
        assert_eq!(tl.last_observed_month(), Some(m(2024, 3)));
        assert_eq!(tl.last_observation(), Some(Observation::new(m(2024, 3), 3.0)));
    }

    #[test]
    fn test_build_empty() {
        let tl = Timeline::build(&ObservationSet::default());
        assert!(tl.is_empty());
        assert!(tl.history().is_empty());
        assert!(tl.future().is_empty());
        assert!(tl.before(m(2024, 1)).is_empty());
    }

    #[test]
    fn test_history_and_future_split() {
        let tl = Timeline::build(&set(&[(m(2024, 1), 1.0), (m(2024, 4), 4.0)]));
        assert_eq!(tl.history().len(), 4);
        assert_eq!(tl.future().len(), 12);
        assert_eq!(tl.future()[0].period, m(2024, 5));
    }

    #[test]
    fn test_position_out_of_range() {
        let tl = Timeline::build(&set(&[(m(2024, 1), 1.0)]));
        assert_eq!(tl.position(m(2023, 12)), None);
        assert_eq!(tl.position(m(2025, 1)), Some(12));
        assert_eq!(tl.position(m(2025, 2)), None);
    }

    #[test]
    fn test_observed_before() {
        let tl = Timeline::build(&set(&[
            (m(2024, 1), 1.0),
            (m(2024, 2), 2.0),
            (m(2024, 4), 4.0),
        ]));
        assert_eq!(tl.observed_before(m(2024, 4), 6), vec![1.0, 2.0]);
        assert_eq!(tl.observed_before(m(2025, 1), 2), vec![2.0, 4.0]);
        assert!(tl.observed_before(m(2024, 1), 6).is_empty());
    }
}
