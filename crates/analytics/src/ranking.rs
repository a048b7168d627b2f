use crate::error::AnalyticsError;
use crate::stats;
use core_types::{CategoryTotal, SalesRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// The record attribute a revenue breakdown groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Region,
}

impl Dimension {
    fn key<'a>(&self, record: &'a SalesRecord) -> &'a str {
        match self {
            Dimension::Category => record.category(),
            Dimension::Region => record.region(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Category => f.write_str("category"),
            Dimension::Region => f.write_str("region"),
        }
    }
}

/// One slice of a revenue breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    /// Share of the overall revenue, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub share_pct: Decimal,
}

/// Revenue distribution over one dimension, largest slice first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueBreakdown {
    pub dimension: Dimension,
    pub entries: Vec<BreakdownEntry>,
}

/// Ranks revenue by category.
#[derive(Debug, Default)]
pub struct CategoryRanker {}

impl CategoryRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Category totals, descending. Equal totals keep first-seen order.
    pub fn rank(&self, records: &[SalesRecord]) -> Result<Vec<CategoryTotal>, AnalyticsError> {
        Ok(totals_by(records, Dimension::Category)?
            .into_iter()
            .map(|(category, total_revenue)| CategoryTotal {
                category,
                total_revenue,
            })
            .collect())
    }

    /// Totals and percentage shares over any dimension.
    pub fn breakdown(
        &self,
        records: &[SalesRecord],
        dimension: Dimension,
    ) -> Result<RevenueBreakdown, AnalyticsError> {
        let totals = totals_by(records, dimension)?;
        let grand_total = stats::checked_sum(totals.iter().map(|(_, t)| t))?;

        let entries = totals
            .into_iter()
            .map(|(label, total_revenue)| BreakdownEntry {
                // A share is at most one, so scaling it to percent cannot overflow.
                share_pct: if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    total_revenue / grand_total * Decimal::ONE_HUNDRED
                },
                label,
                total_revenue,
            })
            .collect();

        Ok(RevenueBreakdown { dimension, entries })
    }
}

/// The leading entry of a ranking. An empty ranking has no top category.
pub fn top_category(ranking: &[CategoryTotal]) -> Result<&CategoryTotal, AnalyticsError> {
    ranking.first().ok_or_else(|| {
        AnalyticsError::InsufficientData("no categories to rank".to_string())
    })
}

fn totals_by(
    records: &[SalesRecord],
    dimension: Dimension,
) -> Result<Vec<(String, Decimal)>, AnalyticsError> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, Decimal)> = Vec::new();

    for record in records {
        let key = dimension.key(record);
        match index.get(key) {
            Some(&i) => {
                totals[i].1 = totals[i].1.checked_add(record.revenue()).ok_or_else(|| {
                    AnalyticsError::Calculation(format!(
                        "revenue for {dimension} '{key}' exceeds the representable range"
                    ))
                })?;
            }
            None => {
                index.insert(key, totals.len());
                totals.push((key.to_string(), record.revenue()));
            }
        }
    }

    // `sort_by` is stable, so ties stay in first-seen order.
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(totals)
}
