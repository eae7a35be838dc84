use crate::config::forecast_config::YEAR_LAG;
use crate::timeline::timeline::Timeline;

/// Fill `prior_year_amount` and `growth_rate` on every row.
///
/// The anchor for month P is looked up by calendar month (`P - 12`), never by
/// row offset. A missing or zero anchor leaves the growth rate empty.
pub fn compute_growth_factors(mut timeline: Timeline) -> Timeline {
    let anchors: Vec<Option<f64>> = timeline
        .iter()
        .map(|p| timeline.observed_at(p.period.sub_months(YEAR_LAG)))
        .collect();

    for (point, prior) in timeline.points.iter_mut().zip(anchors) {
        point.prior_year_amount = prior;
        point.growth_rate = growth_rate(point.observed_amount, prior);
    }
    timeline
}

/// `observed / prior - 1`, or `None` when either side is missing or the prior is zero
pub fn growth_rate(observed: Option<f64>, prior: Option<f64>) -> Option<f64> {
    match (observed, prior) {
        (Some(cur), Some(prev)) if prev != 0.0 => Some(cur / prev - 1.0),
        _ => None,
    }
}
