use core_types::ForecastPoint;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;

/// Overall direction of a forecast, from its first to its last projected month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForecastOutlook {
    Bullish,
    Bearish,
    Sideways,
}

impl ForecastOutlook {
    /// Percent change beyond which the forecast counts as trending.
    pub const TREND_BAND_PCT: Decimal = dec!(2);

    pub fn from_points(points: &[ForecastPoint]) -> Self {
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return ForecastOutlook::Sideways;
        };
        if first.predicted_revenue.is_zero() {
            return ForecastOutlook::Sideways;
        }

        let (first, last) = (first.predicted_revenue, last.predicted_revenue);
        let change_pct = last
            .checked_sub(first)
            .and_then(|diff| diff.checked_div(first))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
        let Some(change_pct) = change_pct else {
            // Too large to represent, so far outside the band either way.
            return if (last > first) == first.is_sign_positive() {
                ForecastOutlook::Bullish
            } else {
                ForecastOutlook::Bearish
            };
        };
        if change_pct > Self::TREND_BAND_PCT {
            ForecastOutlook::Bullish
        } else if change_pct < -Self::TREND_BAND_PCT {
            ForecastOutlook::Bearish
        } else {
            ForecastOutlook::Sideways
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastOutlook::Bullish => "bullish",
            ForecastOutlook::Bearish => "bearish",
            ForecastOutlook::Sideways => "sideways",
        }
    }
}

impl fmt::Display for ForecastOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Period;

    fn points(values: &[Decimal]) -> Vec<ForecastPoint> {
        let mut period = Period::new(2024, 1).unwrap();
        values
            .iter()
            .map(|v| {
                period = period.succ();
                ForecastPoint::new(period, *v).unwrap()
            })
            .collect()
    }

    #[test]
    fn classifies_by_first_to_last_change() {
        assert_eq!(ForecastOutlook::from_points(&points(&[dec!(100), dec!(90), dec!(103)])), ForecastOutlook::Bullish);
        assert_eq!(ForecastOutlook::from_points(&points(&[dec!(100), dec!(97)])), ForecastOutlook::Bearish);
        assert_eq!(ForecastOutlook::from_points(&points(&[dec!(100), dec!(102)])), ForecastOutlook::Sideways);
        assert_eq!(ForecastOutlook::from_points(&points(&[dec!(100), dec!(98)])), ForecastOutlook::Sideways);
    }

    #[test]
    fn empty_forecast_is_sideways() {
        assert_eq!(ForecastOutlook::from_points(&[]), ForecastOutlook::Sideways);
    }

    #[test]
    fn change_too_large_to_represent_still_classifies() {
        let tiny = Decimal::new(1, 20);
        let huge = Decimal::from(10u64.pow(12));
        assert_eq!(ForecastOutlook::from_points(&points(&[tiny, huge])), ForecastOutlook::Bullish);
        assert_eq!(ForecastOutlook::from_points(&points(&[-tiny, huge])), ForecastOutlook::Bearish);
    }
}
