//! Shared statistics over `Decimal` slices.
//!
//! `Ok(None)` means the statistic is undefined for the input (too few values).
//! Every sum and product is checked, so a result outside the `Decimal` range is
//! an `AnalyticsError::Calculation` rather than a panic.

use crate::error::AnalyticsError;
use rust_decimal::{Decimal, MathematicalOps};

fn overflow(what: &str) -> AnalyticsError {
    AnalyticsError::Calculation(format!("{what} exceeds the representable range"))
}

/// Sums with overflow checking.
pub fn checked_sum<'a>(
    values: impl IntoIterator<Item = &'a Decimal>,
) -> Result<Decimal, AnalyticsError> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v).ok_or_else(|| overflow("sum"))
    })
}

pub fn mean(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    if values.is_empty() {
        return Ok(None);
    }
    let sum = checked_sum(values)?;
    Ok(Some(sum / Decimal::from(values.len())))
}

fn std_dev(values: &[Decimal], ddof: usize) -> Result<Option<Decimal>, AnalyticsError> {
    if values.len() <= ddof {
        return Ok(None);
    }
    let Some(mean) = mean(values)? else {
        return Ok(None);
    };
    let squares = values
        .iter()
        .map(|v| {
            let deviation = v.checked_sub(mean).ok_or_else(|| overflow("deviation"))?;
            deviation
                .checked_mul(deviation)
                .ok_or_else(|| overflow("squared deviation"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let variance = checked_sum(&squares)? / Decimal::from(values.len() - ddof);
    Ok(variance.sqrt())
}

/// Standard deviation with Bessel's correction. Needs at least two values.
pub fn sample_std_dev(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    std_dev(values, 1)
}

/// Standard deviation over the whole population. Needs at least one value.
pub fn population_std_dev(values: &[Decimal]) -> Result<Option<Decimal>, AnalyticsError> {
    std_dev(values, 0)
}

/// Fractional change between consecutive values (0.1 = +10%).
///
/// Pairs whose earlier value is zero have no defined change and are skipped.
pub fn pct_changes(values: &[Decimal]) -> Result<Vec<Decimal>, AnalyticsError> {
    values
        .windows(2)
        .filter(|w| !w[0].is_zero())
        .map(|w| {
            w[1].checked_sub(w[0])
                .and_then(|d| d.checked_div(w[0]))
                .ok_or_else(|| overflow("percentage change"))
        })
        .collect()
}
