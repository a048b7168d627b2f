use crate::enums::AnomalyKind;
use crate::error::CoreError;
use crate::period::Period;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of aggregated revenue and its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub period: Period,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    /// `None` for the first period, or when the previous period's revenue is zero.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub growth_pct: Option<Decimal>,
    /// `None` until a full trailing window has been observed.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub moving_avg: Option<Decimal>,
}

/// A chronologically ordered run of `MonthlyPoint`s with unique periods.
///
/// Construction rejects any out-of-order or duplicate period, so every consumer
/// can rely on index order meaning time order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct MonthlySeries {
    points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    pub fn new(points: Vec<MonthlyPoint>) -> Result<Self, CoreError> {
        for pair in points.windows(2) {
            if pair[1].period <= pair[0].period {
                return Err(CoreError::UnorderedPeriods(
                    pair[1].period.to_string(),
                    pair[0].period.to_string(),
                ));
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[MonthlyPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&MonthlyPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&MonthlyPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MonthlyPoint> {
        self.points.iter()
    }

    pub fn revenues(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.revenue).collect()
    }

    /// Growth values in order, skipping the undefined ones.
    pub fn defined_growth(&self) -> Vec<Decimal> {
        self.points.iter().filter_map(|p| p.growth_pct).collect()
    }

    /// Month-over-month growth of the most recent period, if defined.
    pub fn latest_growth_pct(&self) -> Option<Decimal> {
        self.points.last().and_then(|p| p.growth_pct)
    }
}

impl<'a> IntoIterator for &'a MonthlySeries {
    type Item = &'a MonthlyPoint;
    type IntoIter = std::slice::Iter<'a, MonthlyPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Total revenue attributed to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
}

/// One projected month. Bounds always bracket the prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(rename = "month")]
    pub period: Period,
    #[serde(with = "rust_decimal::serde::float")]
    pub predicted_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub lower_bound: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub upper_bound: Decimal,
}

impl ForecastPoint {
    const LOWER_FACTOR: Decimal = Decimal::from_parts(90, 0, 0, false, 2);
    const UPPER_FACTOR: Decimal = Decimal::from_parts(110, 0, 0, false, 2);

    /// Builds a point with bounds at 90% and 110% of the prediction.
    ///
    /// Fails when the upper band does not fit in a `Decimal`.
    pub fn new(period: Period, predicted_revenue: Decimal) -> Result<Self, CoreError> {
        let out_of_range = || {
            CoreError::InvalidInput(
                "forecast".to_string(),
                format!("band around {predicted_revenue} exceeds the representable range"),
            )
        };
        let a = predicted_revenue
            .checked_mul(Self::LOWER_FACTOR)
            .ok_or_else(out_of_range)?;
        let b = predicted_revenue
            .checked_mul(Self::UPPER_FACTOR)
            .ok_or_else(out_of_range)?;
        // A negative prediction flips which factor gives the smaller value.
        Ok(Self {
            period,
            predicted_revenue,
            lower_bound: a.min(b),
            upper_bound: a.max(b),
        })
    }

    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            period: self.period,
            predicted_revenue: self.predicted_revenue.round_dp(dp),
            lower_bound: self.lower_bound.round_dp(dp),
            upper_bound: self.upper_bound.round_dp(dp),
        }
    }
}

/// A month whose revenue lies unusually far from the series mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyEvent {
    #[serde(rename = "month")]
    pub period: Period,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
    #[serde(rename = "type")]
    pub kind: AnomalyKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub z_score: Decimal,
}

impl AnomalyEvent {
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            period: self.period,
            revenue: self.revenue.round_dp(dp),
            kind: self.kind,
            z_score: self.z_score.round_dp(dp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn point(year: i32, month: u32, revenue: Decimal) -> MonthlyPoint {
        MonthlyPoint {
            period: Period::new(year, month).unwrap(),
            revenue,
            growth_pct: None,
            moving_avg: None,
        }
    }

    #[test]
    fn series_rejects_duplicate_or_backwards_periods() {
        let dup = vec![point(2024, 1, dec!(1)), point(2024, 1, dec!(2))];
        assert!(matches!(MonthlySeries::new(dup), Err(CoreError::UnorderedPeriods(..))));

        let backwards = vec![point(2024, 3, dec!(1)), point(2024, 2, dec!(2))];
        assert!(MonthlySeries::new(backwards).is_err());

        let ok = vec![point(2023, 12, dec!(1)), point(2024, 2, dec!(2))];
        assert_eq!(MonthlySeries::new(ok).unwrap().len(), 2);
    }

    #[test]
    fn forecast_bounds_bracket_prediction() {
        let p = ForecastPoint::new(Period::new(2024, 4).unwrap(), dec!(1000)).unwrap();
        assert_eq!(p.lower_bound, dec!(900));
        assert_eq!(p.upper_bound, dec!(1100));

        let negative = ForecastPoint::new(Period::new(2024, 4).unwrap(), dec!(-50)).unwrap();
        assert!(negative.lower_bound <= negative.predicted_revenue);
        assert!(negative.predicted_revenue <= negative.upper_bound);

        assert!(ForecastPoint::new(Period::new(2024, 4).unwrap(), Decimal::MAX).is_err());
    }

    #[test]
    fn anomaly_serializes_with_export_field_names() {
        let event = AnomalyEvent {
            period: Period::new(2024, 7).unwrap(),
            revenue: dec!(5000.456),
            kind: AnomalyKind::Spike,
            z_score: dec!(3.14159),
        }
        .rounded(2);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["month"], "2024-07");
        assert_eq!(json["type"], "Unusual Spike");
        assert_eq!(json["revenue"].as_f64().unwrap(), 5000.46);
        assert_eq!(json["z_score"].as_f64().unwrap(), 3.14);
    }
}
