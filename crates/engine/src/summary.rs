use crate::bundle::ResultBundle;
use crate::error::EngineError;
use analytics::KpiReport;
use analytics::ranking::top_category;
use core_types::{AnomalyEvent, CategoryTotal};
use decision::DecisionVerdict;
use forecast::ForecastOutlook;
use risk::RiskAssessment;

/// Decimal places used for every number in the exported bundle.
pub const EXPORT_DECIMALS: u32 = 2;

/// Everything the composer needs, borrowed from the upstream stages.
#[derive(Debug, Clone, Copy)]
pub struct SummaryInputs<'a> {
    pub verdict: &'a DecisionVerdict,
    pub ranking: &'a [CategoryTotal],
    pub risk: &'a RiskAssessment,
    pub outlook: ForecastOutlook,
    pub horizon_months: usize,
    pub kpis: &'a KpiReport,
    pub anomalies: &'a [AnomalyEvent],
}

/// Assembles the result bundle. Templating only; no statistics happen here.
#[derive(Debug, Default)]
pub struct SummaryComposer {}

impl SummaryComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if the ranking is empty; there is no placeholder top category.
    pub fn compose(&self, inputs: SummaryInputs<'_>) -> Result<ResultBundle, EngineError> {
        let top = top_category(inputs.ranking)?;
        let health = inputs.verdict.health();

        let executive_commentary = format!(
            "The business is currently showing a {} trend. \
             The top performing category is {}. \
             Overall risk level is {}, with a {} forecast over the next {} {}.",
            health.as_str().to_lowercase(),
            top.category,
            inputs.risk.level,
            inputs.outlook,
            inputs.horizon_months,
            if inputs.horizon_months == 1 { "month" } else { "months" },
        );

        Ok(ResultBundle {
            business_health: health,
            top_category: top.category.clone(),
            action: inputs.verdict.action().to_string(),
            executive_commentary,
            kpis: inputs.kpis.rounded(EXPORT_DECIMALS),
            anomalies: inputs
                .anomalies
                .iter()
                .map(|a| a.rounded(EXPORT_DECIMALS))
                .collect(),
        })
    }
}

/// Follow-up suggestions drawn from the finished bundle.
pub fn recommendations(bundle: &ResultBundle) -> Vec<String> {
    let mut out = vec![format!(
        "Increase inventory and promotions for {}",
        bundle.top_category()
    )];
    if bundle.business_health() == core_types::BusinessHealth::Upward {
        out.push("Consider expanding sales channels".to_string());
    }
    if !bundle.anomalies().is_empty() {
        out.push("Investigate detected sales anomalies".to_string());
    }
    out
}
