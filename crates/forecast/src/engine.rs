use crate::error::ForecastError;
use crate::sampling;
use analytics::stats;
use core_types::{ForecastPoint, MonthlySeries};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

/// Builds the forecast generator: replayable when seeded, fresh entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Random-walk revenue projector.
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    horizon: usize,
    default_volatility: Decimal,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            horizon: 3,
            default_volatility: dec!(0.05),
        }
    }
}

impl ForecastEngine {
    pub fn new(horizon: usize, default_volatility: Decimal) -> Self {
        Self {
            horizon,
            default_volatility,
        }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Sample standard deviation of the month-over-month fractional changes.
    ///
    /// `None` when fewer than two changes exist.
    pub fn historical_volatility(series: &MonthlySeries) -> Result<Option<Decimal>, ForecastError> {
        let changes = stats::pct_changes(&series.revenues())?;
        Ok(stats::sample_std_dev(&changes)?)
    }

    /// The volatility that drives the walk.
    ///
    /// Falls back to `default_volatility` when the history cannot support an
    /// estimate. This is the only place in the pipeline that substitutes a value
    /// for a missing precondition.
    pub fn volatility(&self, series: &MonthlySeries) -> Result<Decimal, ForecastError> {
        Ok(match Self::historical_volatility(series)? {
            Some(volatility) => volatility,
            None => {
                tracing::warn!(
                    months = series.len(),
                    fallback = %self.default_volatility,
                    "Volatility is undefined for this history; using the default."
                );
                self.default_volatility
            }
        })
    }

    /// Projects `horizon` months past the end of `series` using the given generator.
    pub fn project<R: Rng + ?Sized>(
        &self,
        series: &MonthlySeries,
        rng: &mut R,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let last = series.last().ok_or_else(|| {
            ForecastError::InsufficientData("the monthly series is empty".to_string())
        })?;

        let volatility = self.volatility(series)?;
        let sigma = volatility.to_f64().ok_or_else(|| {
            ForecastError::Calculation(format!("volatility {volatility} is not representable"))
        })?;

        let mut value = last.revenue;
        let mut period = last.period;
        let mut points = Vec::with_capacity(self.horizon);

        for _ in 0..self.horizon {
            let draw = sampling::normal(rng, 0.0, sigma);
            let shock = Decimal::from_f64(draw).ok_or_else(|| {
                ForecastError::Calculation(format!("random draw {draw} is not representable"))
            })?;

            value = value.checked_mul(Decimal::ONE + shock).ok_or_else(|| {
                ForecastError::Calculation(format!("projected revenue after {period} overflows"))
            })?;
            period = period.succ();
            let point = ForecastPoint::new(period, value)
                .map_err(|e| ForecastError::Calculation(e.to_string()))?;
            points.push(point);
        }

        tracing::debug!(
            horizon = self.horizon,
            %volatility,
            from = %last.period,
            "Forecast projected."
        );
        Ok(points)
    }

    /// Convenience wrapper around `project` with a generator built from `seed`.
    pub fn forecast(
        &self,
        series: &MonthlySeries,
        seed: Option<u64>,
    ) -> Result<Vec<ForecastPoint>, ForecastError> {
        let mut rng = rng_from_seed(seed);
        self.project(series, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::TimeSeriesAggregator;
    use core_types::Period;

    fn series(revenues: &[Decimal]) -> MonthlySeries {
        TimeSeriesAggregator::new()
            .from_revenues(Period::new(2024, 1).unwrap(), revenues)
            .unwrap()
    }

    fn history() -> MonthlySeries {
        series(&[dec!(1000), dec!(1100), dec!(950), dec!(1200), dec!(1150)])
    }

    #[test]
    fn same_seed_replays_same_forecast() {
        let engine = ForecastEngine::default();
        let a = engine.forecast(&history(), Some(42)).unwrap();
        let b = engine.forecast(&history(), Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let engine = ForecastEngine::default();
        let a = engine.forecast(&history(), Some(1)).unwrap();
        let b = engine.forecast(&history(), Some(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn periods_are_contiguous_after_history() {
        let engine = ForecastEngine::new(4, dec!(0.05));
        let points = engine.forecast(&series(&[dec!(10), dec!(20)]), Some(3)).unwrap();
        let periods: Vec<String> = points.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(periods, vec!["2024-03", "2024-04", "2024-05", "2024-06"]);
    }

    #[test]
    fn bounds_always_bracket_prediction() {
        let engine = ForecastEngine::new(12, dec!(0.05));
        for seed in 0..50 {
            for p in engine.forecast(&history(), Some(seed)).unwrap() {
                assert!(p.lower_bound <= p.predicted_revenue);
                assert!(p.predicted_revenue <= p.upper_bound);
            }
        }
    }

    #[test]
    fn short_history_falls_back_to_default_volatility() {
        let two_months = series(&[dec!(100), dec!(120)]);
        assert_eq!(ForecastEngine::historical_volatility(&two_months).unwrap(), None);
        assert_eq!(ForecastEngine::new(3, dec!(0.07)).volatility(&two_months).unwrap(), dec!(0.07));

        // A single month still forecasts, from the default volatility.
        let points = ForecastEngine::default()
            .forecast(&series(&[dec!(500)]), Some(9))
            .unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn steady_growth_has_zero_volatility_and_a_flat_walk() {
        let steady = series(&[dec!(100), dec!(110), dec!(121)]);
        assert_eq!(ForecastEngine::historical_volatility(&steady).unwrap(), Some(Decimal::ZERO));

        let points = ForecastEngine::default().forecast(&steady, Some(5)).unwrap();
        for p in points {
            assert_eq!(p.predicted_revenue, dec!(121));
        }
    }

    #[test]
    fn injected_generator_is_used() {
        let engine = ForecastEngine::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let injected = engine.project(&history(), &mut rng).unwrap();
        assert_eq!(injected, engine.forecast(&history(), Some(11)).unwrap());
    }

    #[test]
    fn empty_history_cannot_be_forecast() {
        assert!(matches!(
            ForecastEngine::default().forecast(&series(&[]), Some(1)),
            Err(ForecastError::InsufficientData(_))
        ));
    }

    #[test]
    fn projection_beyond_decimal_range_is_a_calculation_error() {
        let near_max = series(&[Decimal::MAX - dec!(1)]);
        assert!(matches!(
            ForecastEngine::new(3, dec!(0.001)).forecast(&near_max, Some(4)),
            Err(ForecastError::Calculation(_))
        ));
    }
}
