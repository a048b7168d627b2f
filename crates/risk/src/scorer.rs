use crate::error::RiskError;
use analytics::stats;
use configuration::PolicySettings;
use core_types::{ForecastPoint, MonthlySeries, RiskLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Which warning signs fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RiskFactors {
    pub negative_growth: bool,
    pub high_volatility: bool,
    pub weak_forecast: bool,
}

/// The composite risk score and its level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub score: u32,
    pub level: RiskLevel,
    pub factors: RiskFactors,
    /// Population standard deviation of growth, in percentage points.
    #[serde(with = "rust_decimal::serde::float")]
    pub growth_volatility: Decimal,
}

/// A rule-based scorer driven by the configured policy weights.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    negative_growth_weight: u32,
    volatility_weight: u32,
    weak_forecast_weight: u32,
    volatility_cutoff_pct: Decimal,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self {
            negative_growth_weight: 40,
            volatility_weight: 30,
            weak_forecast_weight: 30,
            volatility_cutoff_pct: dec!(15),
        }
    }
}

impl RiskScorer {
    /// Creates a new `RiskScorer` from the policy parameters.
    pub fn new(policy: &PolicySettings) -> Result<Self, RiskError> {
        // The weights must fill the 100-point scale exactly.
        policy
            .validate()
            .map_err(|e| RiskError::InvalidParameters(e.to_string()))?;
        Ok(Self {
            negative_growth_weight: policy.negative_growth_weight,
            volatility_weight: policy.volatility_weight,
            weak_forecast_weight: policy.weak_forecast_weight,
            volatility_cutoff_pct: policy.growth_volatility_cutoff_pct,
        })
    }

    /// Every score this scorer can produce, ascending.
    pub fn attainable_scores(&self) -> Vec<u32> {
        let mut scores = Vec::with_capacity(8);
        for a in [0, self.negative_growth_weight] {
            for b in [0, self.volatility_weight] {
                for c in [0, self.weak_forecast_weight] {
                    scores.push(a + b + c);
                }
            }
        }
        scores.sort_unstable();
        scores.dedup();
        scores
    }

    /// Scores the series against its forecast.
    ///
    /// Requires the latest month to have a defined growth value and a non-empty
    /// forecast; neither is guessed.
    pub fn assess(
        &self,
        series: &MonthlySeries,
        forecast: &[ForecastPoint],
    ) -> Result<RiskAssessment, RiskError> {
        // --- 1. Preconditions ---
        let latest_growth = series.latest_growth_pct().ok_or_else(|| {
            RiskError::InsufficientData("the latest month has no growth value".to_string())
        })?;
        if forecast.is_empty() {
            return Err(RiskError::InsufficientData("the forecast is empty".to_string()));
        }

        // --- 2. Inputs ---
        let growth = series.defined_growth();
        let growth_volatility = stats::population_std_dev(&growth)?.ok_or_else(|| {
            RiskError::InsufficientData("no defined growth values".to_string())
        })?;

        let forecast_values: Vec<Decimal> = forecast.iter().map(|f| f.predicted_revenue).collect();
        let forecast_mean = stats::mean(&forecast_values)?
            .ok_or_else(|| RiskError::InsufficientData("the forecast is empty".to_string()))?;
        let history_mean = stats::mean(&series.revenues())?
            .ok_or_else(|| RiskError::InsufficientData("the series is empty".to_string()))?;

        // --- 3. Score ---
        let factors = RiskFactors {
            negative_growth: latest_growth < Decimal::ZERO,
            high_volatility: growth_volatility > self.volatility_cutoff_pct,
            weak_forecast: forecast_mean < history_mean,
        };

        let score: u32 = [
            (factors.negative_growth, self.negative_growth_weight),
            (factors.high_volatility, self.volatility_weight),
            (factors.weak_forecast, self.weak_forecast_weight),
        ]
        .iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, weight)| weight)
        .sum();

        let assessment = RiskAssessment {
            score,
            level: RiskLevel::from_score(score),
            factors,
            growth_volatility,
        };

        tracing::debug!(
            score,
            level = %assessment.level,
            %latest_growth,
            %growth_volatility,
            %forecast_mean,
            %history_mean,
            "Risk assessed."
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::TimeSeriesAggregator;
    use core_types::Period;
    use forecast::ForecastEngine;

    fn series(revenues: &[Decimal]) -> MonthlySeries {
        TimeSeriesAggregator::new()
            .from_revenues(Period::new(2024, 1).unwrap(), revenues)
            .unwrap()
    }

    fn forecast_after(series: &MonthlySeries, values: &[Decimal]) -> Vec<ForecastPoint> {
        let mut period = series.last().unwrap().period;
        values
            .iter()
            .map(|v| {
                period = period.succ();
                ForecastPoint::new(period, *v).unwrap()
            })
            .collect()
    }

    fn score(revenues: &[Decimal], forecast: &[Decimal]) -> RiskAssessment {
        let s = series(revenues);
        let f = forecast_after(&s, forecast);
        RiskScorer::default().assess(&s, &f).unwrap()
    }

    #[test]
    fn calm_growth_with_strong_forecast_is_low_risk() {
        let a = score(&[dec!(100), dec!(105), dec!(110)], &[dec!(120)]);
        assert_eq!(a.score, 0);
        assert_eq!(a.level, RiskLevel::Low);
        assert_eq!(a.factors, RiskFactors::default());
    }

    #[test]
    fn volatile_growth_alone_is_medium_risk() {
        // Growth of +100% then +50%: population deviation 25 points.
        let a = score(&[dec!(100), dec!(200), dec!(300)], &[dec!(400)]);
        assert!((a.growth_volatility - dec!(25)).abs() < dec!(0.000001));
        assert_eq!(a.score, 30);
        assert_eq!(a.level, RiskLevel::Medium);
    }

    #[test]
    fn negative_latest_growth_alone_is_medium_risk() {
        let a = score(&[dec!(100), dec!(90)], &[dec!(200)]);
        assert!(a.factors.negative_growth);
        assert_eq!(a.score, 40);
        assert_eq!(a.level, RiskLevel::Medium);
    }

    #[test]
    fn volatility_and_weak_forecast_is_high_risk() {
        let a = score(&[dec!(100), dec!(200), dec!(300)], &[dec!(10)]);
        assert_eq!(a.score, 60);
        assert_eq!(a.level, RiskLevel::High);
    }

    #[test]
    fn decline_and_weak_forecast_is_high_risk() {
        let a = score(&[dec!(100), dec!(110), dec!(105)], &[dec!(50)]);
        assert_eq!(a.score, 70);
        assert_eq!(a.level, RiskLevel::High);
    }

    #[test]
    fn every_sign_firing_scores_one_hundred() {
        let a = score(&[dec!(100), dec!(200), dec!(100)], &[dec!(50)]);
        assert_eq!(a.score, 100);
        assert_eq!(a.level, RiskLevel::High);
    }

    #[test]
    fn scores_stay_in_the_attainable_set() {
        let scorer = RiskScorer::default();
        let attainable = scorer.attainable_scores();
        assert_eq!(attainable, vec![0, 30, 40, 60, 70, 100]);

        let histories = [
            series(&[dec!(100), dec!(130), dec!(90), dec!(140), dec!(60)]),
            series(&[dec!(500), dec!(510), dec!(520), dec!(530)]),
            series(&[dec!(900), dec!(700), dec!(800)]),
        ];
        let engine = ForecastEngine::default();
        for history in &histories {
            for seed in 0..25 {
                let f = engine.forecast(history, Some(seed)).unwrap();
                let a = scorer.assess(history, &f).unwrap();
                assert!(attainable.contains(&a.score), "unexpected score {}", a.score);
                assert_eq!(a.level, RiskLevel::from_score(a.score));
            }
        }
    }

    #[test]
    fn single_month_cannot_be_scored() {
        let s = series(&[dec!(100)]);
        let f = forecast_after(&s, &[dec!(100)]);
        assert!(matches!(
            RiskScorer::default().assess(&s, &f),
            Err(RiskError::InsufficientData(_))
        ));
    }

    #[test]
    fn empty_forecast_cannot_be_scored() {
        let s = series(&[dec!(100), dec!(120)]);
        assert!(matches!(
            RiskScorer::default().assess(&s, &[]),
            Err(RiskError::InsufficientData(_))
        ));
    }

    #[test]
    fn weights_come_from_policy() {
        let policy = PolicySettings {
            negative_growth_weight: 50,
            volatility_weight: 25,
            weak_forecast_weight: 25,
            ..PolicySettings::default()
        };
        let scorer = RiskScorer::new(&policy).unwrap();
        assert_eq!(scorer.attainable_scores(), vec![0, 25, 50, 75, 100]);

        let overweight = PolicySettings {
            negative_growth_weight: 90,
            ..PolicySettings::default()
        };
        assert!(matches!(RiskScorer::new(&overweight), Err(RiskError::InvalidParameters(_))));

        let underweight = PolicySettings {
            negative_growth_weight: 20,
            ..PolicySettings::default()
        };
        assert!(matches!(RiskScorer::new(&underweight), Err(RiskError::InvalidParameters(_))));
    }

    #[test]
    fn overflowing_weights_are_invalid_not_a_panic() {
        let policy = PolicySettings {
            negative_growth_weight: u32::MAX,
            volatility_weight: 50,
            weak_forecast_weight: 50,
            ..PolicySettings::default()
        };
        assert!(matches!(RiskScorer::new(&policy), Err(RiskError::InvalidParameters(_))));
    }
}
