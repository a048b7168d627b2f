use crate::error::AnalyticsError;
use crate::stats;
use core_types::{AnomalyEvent, AnomalyKind, MonthlySeries, Period};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Flags months whose revenue z-score exceeds a fixed threshold.
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    threshold: Decimal,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self { threshold: dec!(2) }
    }
}

impl AnomalyDetector {
    pub fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Decimal {
        self.threshold
    }

    /// The z-score of every month against the series mean and sample standard deviation.
    ///
    /// Fails with `DegenerateDistribution` when the deviation is zero or undefined
    /// (fewer than two months, or constant revenue).
    pub fn z_scores(&self, series: &MonthlySeries) -> Result<Vec<(Period, Decimal)>, AnalyticsError> {
        let revenues = series.revenues();
        let degenerate = || AnalyticsError::DegenerateDistribution("monthly revenue".to_string());

        let mean = stats::mean(&revenues)?.ok_or_else(degenerate)?;
        let std = stats::sample_std_dev(&revenues)?.ok_or_else(degenerate)?;
        if std.is_zero() {
            return Err(degenerate());
        }

        Ok(series
            .iter()
            .map(|p| (p.period, (p.revenue - mean) / std))
            .collect())
    }

    /// Months with `|z| > threshold`, in chronological order.
    ///
    /// A degenerate distribution has no outliers, so it yields an empty list.
    pub fn detect(&self, series: &MonthlySeries) -> Result<Vec<AnomalyEvent>, AnalyticsError> {
        let scores = match self.z_scores(series) {
            Ok(scores) => scores,
            Err(AnalyticsError::DegenerateDistribution(what)) => {
                tracing::debug!(%what, "No spread in revenue; skipping anomaly detection.");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let anomalies: Vec<AnomalyEvent> = series
            .iter()
            .zip(scores)
            .filter(|(_, (_, z))| z.abs() > self.threshold)
            .map(|(point, (period, z_score))| AnomalyEvent {
                period,
                revenue: point.revenue,
                kind: AnomalyKind::from_z_score(z_score),
                z_score,
            })
            .collect();

        tracing::debug!(count = anomalies.len(), threshold = %self.threshold, "Anomaly detection finished.");
        Ok(anomalies)
    }
}
