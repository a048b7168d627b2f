use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The trend-based verdict on how the business is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusinessHealth {
    Upward,
    Downward,
    Stable,
}

impl BusinessHealth {
    /// Classifies the mean period-over-period revenue change.
    ///
    /// Only an exact zero is `Stable`; any positive or negative drift, however
    /// small, tips the verdict.
    pub fn from_trend(trend: Decimal) -> Self {
        match trend.cmp(&Decimal::ZERO) {
            Ordering::Greater => BusinessHealth::Upward,
            Ordering::Less => BusinessHealth::Downward,
            Ordering::Equal => BusinessHealth::Stable,
        }
    }

    /// The recommended action that goes with each verdict.
    pub fn action(&self) -> &'static str {
        match self {
            BusinessHealth::Upward => "Scale operations and marketing",
            BusinessHealth::Downward => "Reduce costs and investigate decline",
            BusinessHealth::Stable => "Maintain current strategy",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessHealth::Upward => "Upward",
            BusinessHealth::Downward => "Downward",
            BusinessHealth::Stable => "Stable",
        }
    }
}

impl fmt::Display for BusinessHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-tier label derived from a composite risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskLevel {
    /// Scores at or above this are `High`.
    pub const HIGH_THRESHOLD: u32 = 60;
    /// Scores at or above this (and below `HIGH_THRESHOLD`) are `Medium`.
    pub const MEDIUM_THRESHOLD: u32 = 30;

    pub fn from_score(score: u32) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }

    /// The short status banner shown next to the risk level.
    pub fn status(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Stable",
            RiskLevel::Medium => "Monitor Closely",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a statistically unusual month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyKind {
    #[serde(rename = "Unusual Spike")]
    Spike,
    #[serde(rename = "Unusual Drop")]
    Drop,
}

impl AnomalyKind {
    pub fn from_z_score(z_score: Decimal) -> Self {
        if z_score > Decimal::ZERO {
            AnomalyKind::Spike
        } else {
            AnomalyKind::Drop
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyKind::Spike => "Unusual Spike",
            AnomalyKind::Drop => "Unusual Drop",
        }
    }
}

impl fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn health_from_trend_covers_every_branch() {
        assert_eq!(BusinessHealth::from_trend(dec!(0.0001)), BusinessHealth::Upward);
        assert_eq!(BusinessHealth::from_trend(dec!(-0.0001)), BusinessHealth::Downward);
        assert_eq!(BusinessHealth::from_trend(dec!(0)), BusinessHealth::Stable);
        assert_eq!(BusinessHealth::from_trend(dec!(0.000)), BusinessHealth::Stable);
    }

    #[test]
    fn actions_are_tied_to_health() {
        assert_eq!(BusinessHealth::Upward.action(), "Scale operations and marketing");
        assert_eq!(
            BusinessHealth::Downward.action(),
            "Reduce costs and investigate decline"
        );
        assert_eq!(BusinessHealth::Stable.action(), "Maintain current strategy");
    }

    #[test]
    fn risk_level_is_a_step_function_of_score() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn enums_serialize_with_display_labels() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium Risk\"");
        assert_eq!(serde_json::to_string(&AnomalyKind::Drop).unwrap(), "\"Unusual Drop\"");
        assert_eq!(serde_json::to_string(&BusinessHealth::Stable).unwrap(), "\"Stable\"");
    }

    #[test]
    fn anomaly_kind_follows_z_score_sign() {
        assert_eq!(AnomalyKind::from_z_score(dec!(2.5)), AnomalyKind::Spike);
        assert_eq!(AnomalyKind::from_z_score(dec!(-2.5)), AnomalyKind::Drop);
    }
}
