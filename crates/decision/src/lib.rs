use core_types::{BusinessHealth, MonthlySeries};
use rust_decimal::Decimal;
use serde::Serialize;

pub mod error;

pub use error::DecisionError;

/// The minimum number of months needed to form one revenue difference.
pub const MIN_MONTHS: usize = 2;

/// A business-health verdict and the action it implies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionVerdict {
    health: BusinessHealth,
    action: &'static str,
    /// Mean month-over-month revenue change the verdict was drawn from.
    #[serde(with = "rust_decimal::serde::float")]
    trend: Decimal,
}

impl DecisionVerdict {
    pub fn from_trend(trend: Decimal) -> Self {
        let health = BusinessHealth::from_trend(trend);
        Self {
            health,
            action: health.action(),
            trend,
        }
    }

    pub fn health(&self) -> BusinessHealth {
        self.health
    }

    pub fn action(&self) -> &'static str {
        self.action
    }

    pub fn trend(&self) -> Decimal {
        self.trend
    }
}

/// A stateless, rule-based classifier of the revenue trend.
#[derive(Debug, Default)]
pub struct DecisionEngine {}

impl DecisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies the series by the mean of its successive revenue differences.
    pub fn evaluate(&self, series: &MonthlySeries) -> Result<DecisionVerdict, DecisionError> {
        if series.len() < MIN_MONTHS {
            return Err(DecisionError::InsufficientData {
                required: MIN_MONTHS,
                actual: series.len(),
            });
        }

        let diffs: Vec<Decimal> = series
            .points()
            .windows(2)
            .map(|w| w[1].revenue - w[0].revenue)
            .collect();
        let trend = diffs.iter().sum::<Decimal>() / Decimal::from(diffs.len());

        let verdict = DecisionVerdict::from_trend(trend);
        tracing::debug!(%trend, health = %verdict.health(), "Business health classified.");
        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::TimeSeriesAggregator;
    use core_types::Period;
    use rust_decimal_macros::dec;

    fn evaluate(revenues: &[Decimal]) -> Result<DecisionVerdict, DecisionError> {
        let series = TimeSeriesAggregator::new()
            .from_revenues(Period::new(2024, 1).unwrap(), revenues)
            .unwrap();
        DecisionEngine::new().evaluate(&series)
    }

    #[test]
    fn rising_series_is_upward() {
        let verdict = evaluate(&[dec!(100), dec!(200), dec!(300)]).unwrap();
        assert_eq!(verdict.health(), BusinessHealth::Upward);
        assert_eq!(verdict.action(), "Scale operations and marketing");
        assert_eq!(verdict.trend(), dec!(100));
    }

    #[test]
    fn falling_series_is_downward() {
        let verdict = evaluate(&[dec!(300), dec!(200), dec!(100)]).unwrap();
        assert_eq!(verdict.health(), BusinessHealth::Downward);
        assert_eq!(verdict.action(), "Reduce costs and investigate decline");
    }

    #[test]
    fn flat_series_is_stable() {
        let verdict = evaluate(&[dec!(100), dec!(100), dec!(100)]).unwrap();
        assert_eq!(verdict.health(), BusinessHealth::Stable);
        assert_eq!(verdict.action(), "Maintain current strategy");
    }

    #[test]
    fn round_trip_back_to_start_is_exactly_stable() {
        let verdict = evaluate(&[dec!(100.10), dec!(250.55), dec!(40.01), dec!(100.10)]).unwrap();
        assert_eq!(verdict.trend(), Decimal::ZERO);
        assert_eq!(verdict.health(), BusinessHealth::Stable);
    }

    #[test]
    fn needs_at_least_two_months() {
        assert!(matches!(
            evaluate(&[dec!(100)]),
            Err(DecisionError::InsufficientData { required: 2, actual: 1 })
        ));
        assert!(evaluate(&[]).is_err());
    }
}
