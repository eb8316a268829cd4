use crate::models::energy::{DailyGranularity, Series, YearlyScope};

/// Short-range view: the hourly or the daily series, verbatim.
pub fn select_daily_view<'a>(
    hourly: &'a Series,
    daily: &'a Series,
    granularity: DailyGranularity,
) -> &'a Series {
    match granularity {
        DailyGranularity::Hourly => hourly,
        DailyGranularity::DailyInMonth => daily,
    }
}

/// Yearly view: the whole series, or only the point whose label equals the scope.
///
/// A scope that matches nothing yields an empty series.
pub fn select_yearly_view(yearly: &Series, scope: &YearlyScope) -> Series {
    match scope {
        YearlyScope::Overall => yearly.clone(),
        YearlyScope::Month(label) => yearly
            .iter()
            .filter(|p| p.name == *label)
            .cloned()
            .collect(),
    }
}
