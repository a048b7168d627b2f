use crate::error::AnalyticsError;
use core_types::{MonthlyPoint, MonthlySeries, Period, SalesRecord};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Number of trailing periods, inclusive of the current one, in the moving average.
pub const MOVING_AVERAGE_WINDOW: usize = 3;

/// Groups clean records into a chronologically ordered monthly series.
#[derive(Debug, Default)]
pub struct TimeSeriesAggregator {}

impl TimeSeriesAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sums revenue per calendar month. Input order does not matter.
    pub fn aggregate(&self, records: &[SalesRecord]) -> Result<MonthlySeries, AnalyticsError> {
        let mut totals: BTreeMap<Period, Decimal> = BTreeMap::new();
        for record in records {
            let total = totals.entry(record.period()).or_insert(Decimal::ZERO);
            *total = total.checked_add(record.revenue()).ok_or_else(|| {
                AnalyticsError::Calculation(format!(
                    "revenue for {} exceeds the representable range",
                    record.period()
                ))
            })?;
        }

        let series = self.from_monthly_totals(totals.into_iter().collect())?;
        tracing::debug!(
            records = records.len(),
            months = series.len(),
            "Aggregated records into monthly series."
        );
        Ok(series)
    }

    /// Derives growth and moving average for already-summed monthly totals.
    ///
    /// Totals must be strictly increasing by period.
    pub fn from_monthly_totals(
        &self,
        totals: Vec<(Period, Decimal)>,
    ) -> Result<MonthlySeries, AnalyticsError> {
        let revenues: Vec<Decimal> = totals.iter().map(|(_, r)| *r).collect();

        let mut points = Vec::with_capacity(totals.len());
        for (idx, (period, revenue)) in totals.iter().enumerate() {
            let growth_pct = match idx.checked_sub(1) {
                Some(prev) => growth_pct(revenues[prev], *revenue)?,
                None => None,
            };
            points.push(MonthlyPoint {
                period: *period,
                revenue: *revenue,
                growth_pct,
                moving_avg: moving_average(&revenues[..=idx])?,
            });
        }

        Ok(MonthlySeries::new(points)?)
    }

    /// Builds a series of consecutive months starting at `start`.
    pub fn from_revenues(
        &self,
        start: Period,
        revenues: &[Decimal],
    ) -> Result<MonthlySeries, AnalyticsError> {
        let mut period = start;
        let mut totals = Vec::with_capacity(revenues.len());
        for revenue in revenues {
            totals.push((period, *revenue));
            period = period.succ();
        }
        self.from_monthly_totals(totals)
    }
}

/// Percentage change from `prev` to `current`; undefined when `prev` is zero.
fn growth_pct(prev: Decimal, current: Decimal) -> Result<Option<Decimal>, AnalyticsError> {
    if prev.is_zero() {
        return Ok(None);
    }
    current
        .checked_sub(prev)
        .and_then(|diff| diff.checked_div(prev))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(Some)
        .ok_or_else(|| {
            AnalyticsError::Calculation(format!("growth from {prev} to {current} overflows"))
        })
}

/// Mean of the last `MOVING_AVERAGE_WINDOW` values of `history`, once that many exist.
fn moving_average(history: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    if history.len() < MOVING_AVERAGE_WINDOW {
        return Ok(None);
    }
    let window = &history[history.len() - MOVING_AVERAGE_WINDOW..];
    crate::stats::mean(window)
}
