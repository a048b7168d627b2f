use crate::error::CoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar year-month bucket, the unit of time-series aggregation.
///
/// Ordering is chronological: `year` is compared before `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidInput(
                "period".to_string(),
                format!("month {month} is outside 1..=12"),
            ));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The immediately following calendar month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = CoreError;

    /// Parses the `YYYY-MM` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidInput("period".to_string(), format!("'{s}' is not YYYY-MM"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn succ_rolls_over_year_end() {
        let dec = Period::new(2023, 12).unwrap();
        assert_eq!(dec.succ(), Period::new(2024, 1).unwrap());
        assert_eq!(Period::new(2024, 5).unwrap().succ(), Period::new(2024, 6).unwrap());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = Period::new(2023, 11).unwrap();
        let b = Period::new(2024, 2).unwrap();
        let c = Period::new(2024, 10).unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn display_and_parse_agree() {
        let p = Period::new(2024, 3).unwrap();
        assert_eq!(p.to_string(), "2024-03");
        assert_eq!("2024-03".parse::<Period>().unwrap(), p);
        assert!("2024-13".parse::<Period>().is_err());
        assert!("March".parse::<Period>().is_err());
    }

    #[test]
    fn from_date_drops_the_day() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 19).unwrap();
        assert_eq!(Period::from_date(date), Period::new(2024, 7).unwrap());
    }

    #[test]
    fn serializes_as_string() {
        let p = Period::new(2025, 1).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2025-01\"");
        let back: Period = serde_json::from_str("\"2025-01\"").unwrap();
        assert_eq!(back, p);
    }
}
