use crate::error::ConfigError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: PolicySettings,
    pub logging: LoggingSettings,
}

/// The policy parameters behind forecasting, risk scoring and anomaly detection.
///
/// The defaults are the historical constants. They carry no calibration of their
/// own, which is why they live here rather than in the stages that use them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    /// Number of future months the forecaster projects.
    pub horizon_months: usize,
    /// Volatility used when the history is too short to estimate one (0.05 = 5%).
    pub default_volatility: Decimal,
    /// Growth standard deviation, in percentage points, above which volatility counts as risk.
    pub growth_volatility_cutoff_pct: Decimal,
    /// Months with |z| strictly above this are anomalies.
    pub z_score_threshold: Decimal,
    /// Risk points added when the latest growth is negative.
    pub negative_growth_weight: u32,
    /// Risk points added when growth volatility exceeds the cutoff.
    pub volatility_weight: u32,
    /// Risk points added when the forecast averages below the historical mean.
    pub weak_forecast_weight: u32,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            horizon_months: 3,
            default_volatility: dec!(0.05),
            growth_volatility_cutoff_pct: dec!(15),
            z_score_threshold: dec!(2),
            negative_growth_weight: 40,
            volatility_weight: 30,
            weak_forecast_weight: 30,
        }
    }
}

/// Log output settings. `RUST_LOG` still wins over `level` when set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// When set, logs are also written to a daily file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()
    }
}

impl PolicySettings {
    /// Checks that the policy parameters are logical.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_months == 0 {
            return Err(ConfigError::ValidationError(
                "horizon_months must be at least 1".to_string(),
            ));
        }
        if self.default_volatility <= Decimal::ZERO || self.default_volatility >= Decimal::ONE {
            return Err(ConfigError::ValidationError(
                "default_volatility must be between 0 and 1".to_string(),
            ));
        }
        if self.growth_volatility_cutoff_pct <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "growth_volatility_cutoff_pct must be greater than 0".to_string(),
            ));
        }
        if self.z_score_threshold <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "z_score_threshold must be greater than 0".to_string(),
            ));
        }
        match self.weight_total() {
            Some(100) => Ok(()),
            Some(total) => Err(ConfigError::ValidationError(format!(
                "risk weights must sum to 100, got {total}"
            ))),
            None => Err(ConfigError::ValidationError(
                "risk weights overflow when summed".to_string(),
            )),
        }
    }

    /// Sum of the three risk weights, or `None` if it does not fit in a `u32`.
    pub fn weight_total(&self) -> Option<u32> {
        self.negative_growth_weight
            .checked_add(self.volatility_weight)?
            .checked_add(self.weak_forecast_weight)
    }
}
