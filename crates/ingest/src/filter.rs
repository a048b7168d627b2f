use core_types::SalesRecord;

/// Restricts a record set to selected categories and regions.
///
/// An empty selection on either axis means "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
}

impl RecordFilter {
    pub fn new(categories: Vec<String>, regions: Vec<String>) -> Self {
        Self { categories, regions }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.categories.is_empty() && self.regions.is_empty()
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        let selected = |choices: &[String], value: &str| {
            choices.is_empty() || choices.iter().any(|c| c == value)
        };
        selected(&self.categories, record.category()) && selected(&self.regions, record.region())
    }

    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        let kept: Vec<SalesRecord> = records.iter().filter(|r| self.matches(r)).cloned().collect();
        if !self.is_unrestricted() {
            tracing::info!(kept = kept.len(), total = records.len(), "Applied record filter.");
        }
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(category: &str, region: &str) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        SalesRecord::new(date, "Item", category, region, dec!(10), dec!(1)).unwrap()
    }

    #[test]
    fn unrestricted_filter_keeps_everything() {
        let records = vec![record("A", "North"), record("B", "South")];
        assert_eq!(RecordFilter::default().apply(&records).len(), 2);
    }

    #[test]
    fn axes_combine_with_and() {
        let records = vec![
            record("A", "North"),
            record("A", "South"),
            record("B", "North"),
        ];
        let filter = RecordFilter::new(vec!["A".into()], vec!["North".into()]);
        let kept = filter.apply(&records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].region(), "North");
        assert_eq!(kept[0].category(), "A");
    }
}
