use crate::error::AnalyticsError;
use crate::stats;
use core_types::{MonthlySeries, Period};
use rust_decimal::Decimal;
use serde::Serialize;

/// Headline scalars for the monthly series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiReport {
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_monthly_revenue: Decimal,
    pub best_month: Period,
    pub worst_month: Period,
    /// Sample standard deviation of monthly revenue; undefined for a single month.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub revenue_volatility: Option<Decimal>,
}

impl KpiReport {
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            avg_monthly_revenue: self.avg_monthly_revenue.round_dp(dp),
            best_month: self.best_month,
            worst_month: self.worst_month,
            revenue_volatility: self.revenue_volatility.map(|v| v.round_dp(dp)),
        }
    }
}

#[derive(Debug, Default)]
pub struct KpiSummarizer {}

impl KpiSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes the series. Ties for best or worst month go to the earliest.
    pub fn summarize(&self, series: &MonthlySeries) -> Result<KpiReport, AnalyticsError> {
        let first = series.first().ok_or_else(|| {
            AnalyticsError::InsufficientData("KPIs need at least one month".to_string())
        })?;

        let mut best = first;
        let mut worst = first;
        for point in series {
            if point.revenue > best.revenue {
                best = point;
            }
            if point.revenue < worst.revenue {
                worst = point;
            }
        }

        let revenues = series.revenues();
        let avg_monthly_revenue = stats::mean(&revenues)?.ok_or_else(|| {
            AnalyticsError::Calculation("mean of a non-empty series".to_string())
        })?;

        Ok(KpiReport {
            avg_monthly_revenue,
            best_month: best.period,
            worst_month: worst.period,
            revenue_volatility: stats::sample_std_dev(&revenues)?,
        })
    }
}
