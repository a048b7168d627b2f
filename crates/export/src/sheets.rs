use crate::error::ExportError;
use core_types::{AnomalyEvent, MonthlySeries};
use csv::Writer;
use engine::{AnalysisRun, EXPORT_DECIMALS};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};

pub const MONTHLY_SHEET: &str = "monthly_sales.csv";
pub const ANOMALIES_SHEET: &str = "anomalies.csv";

fn cell(value: Decimal) -> String {
    value.round_dp(EXPORT_DECIMALS).normalize().to_string()
}

fn optional_cell(value: Option<Decimal>) -> String {
    value.map(cell).unwrap_or_default()
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String, ExportError> {
    let data = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

/// Renders the monthly series. Undefined growth and moving averages are left blank.
pub fn monthly_csv(series: &MonthlySeries) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(["month", "revenue", "growth_pct", "moving_avg"])?;

    for point in series {
        writer.write_record([
            point.period.to_string(),
            cell(point.revenue),
            optional_cell(point.growth_pct),
            optional_cell(point.moving_avg),
        ])?;
    }

    finish(writer)
}

/// Renders the anomaly list. An empty list still yields the header row.
pub fn anomalies_csv(anomalies: &[AnomalyEvent]) -> Result<String, ExportError> {
    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(["month", "revenue", "type", "z_score"])?;

    for anomaly in anomalies {
        writer.write_record([
            anomaly.period.to_string(),
            cell(anomaly.revenue),
            anomaly.kind.to_string(),
            cell(anomaly.z_score),
        ])?;
    }

    finish(writer)
}

pub fn write_monthly_csv(path: &Path, series: &MonthlySeries) -> Result<(), ExportError> {
    fs::write(path, monthly_csv(series)?)?;
    Ok(())
}

pub fn write_anomalies_csv(path: &Path, anomalies: &[AnomalyEvent]) -> Result<(), ExportError> {
    fs::write(path, anomalies_csv(anomalies)?)?;
    Ok(())
}

/// Writes both sheets into `dir`, creating it if needed, and returns the file paths.
pub fn export_sheets(dir: &Path, run: &AnalysisRun) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;

    let monthly_path = dir.join(MONTHLY_SHEET);
    write_monthly_csv(&monthly_path, &run.monthly)?;

    let anomalies_path = dir.join(ANOMALIES_SHEET);
    write_anomalies_csv(&anomalies_path, run.bundle.anomalies())?;

    tracing::info!(
        dir = %dir.display(),
        months = run.monthly.len(),
        anomalies = run.bundle.anomalies().len(),
        "Tabular export written."
    );
    Ok(vec![monthly_path, anomalies_path])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use analytics::TimeSeriesAggregator;
    use chrono::NaiveDate;
    use configuration::PolicySettings;
    use core_types::{AnomalyKind, Period, SalesRecord};
    use engine::Pipeline;
    use rust_decimal_macros::dec;

    pub(crate) fn sample_run() -> AnalysisRun {
        let records: Vec<SalesRecord> = [dec!(1000), dec!(1100), dec!(1200), dec!(1300)]
            .iter()
            .enumerate()
            .map(|(i, price)| {
                let date = NaiveDate::from_ymd_opt(2024, i as u32 + 1, 10).unwrap();
                SalesRecord::new(date, "Phone", "Electronics", "West", *price, dec!(1)).unwrap()
            })
            .collect();

        Pipeline::new(&PolicySettings::default())
            .unwrap()
            .run(&records, Some(3))
            .unwrap()
    }

    #[test]
    fn monthly_sheet_leaves_undefined_cells_blank() {
        let series = TimeSeriesAggregator::new()
            .from_revenues(
                Period::new(2024, 1).unwrap(),
                &[dec!(100), dec!(150), dec!(120.555)],
            )
            .unwrap();

        let csv = monthly_csv(&series).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "month,revenue,growth_pct,moving_avg");
        assert_eq!(lines[1], "2024-01,100,,");
        assert_eq!(lines[2], "2024-02,150,50,");
        assert_eq!(lines[3], "2024-03,120.56,-19.63,123.52");
    }

    #[test]
    fn anomaly_sheet_uses_display_labels() {
        let anomalies = vec![AnomalyEvent {
            period: Period::new(2024, 7).unwrap(),
            revenue: dec!(5000),
            kind: AnomalyKind::Spike,
            z_score: dec!(3.16),
        }];

        let csv = anomalies_csv(&anomalies).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "2024-07,5000,Unusual Spike,3.16");
    }

    #[test]
    fn empty_anomaly_sheet_has_header_only() {
        let csv = anomalies_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn export_sheets_writes_both_files() {
        let run = sample_run();
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        let paths = export_sheets(&target, &run).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));
        let monthly = std::fs::read_to_string(target.join(MONTHLY_SHEET)).unwrap();
        assert_eq!(monthly.lines().count(), 5);
    }
}
