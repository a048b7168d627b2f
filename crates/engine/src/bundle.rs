use analytics::KpiReport;
use core_types::{AnomalyEvent, BusinessHealth};
use serde::Serialize;

/// The exported summary of one pipeline run.
///
/// Built once by `SummaryComposer` and read-only afterwards. All numbers are
/// already rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    pub(crate) business_health: BusinessHealth,
    pub(crate) top_category: String,
    pub(crate) action: String,
    pub(crate) executive_commentary: String,
    pub(crate) kpis: KpiReport,
    pub(crate) anomalies: Vec<AnomalyEvent>,
}

impl ResultBundle {
    pub fn business_health(&self) -> BusinessHealth {
        self.business_health
    }

    pub fn top_category(&self) -> &str {
        &self.top_category
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn executive_commentary(&self) -> &str {
        &self.executive_commentary
    }

    pub fn kpis(&self) -> &KpiReport {
        &self.kpis
    }

    pub fn anomalies(&self) -> &[AnomalyEvent] {
        &self.anomalies
    }
}
