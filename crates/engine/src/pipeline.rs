use crate::bundle::ResultBundle;
use crate::error::EngineError;
use crate::summary::{SummaryComposer, SummaryInputs};
use analytics::{
    AnomalyDetector, CategoryRanker, Dimension, KpiReport, KpiSummarizer, RevenueBreakdown,
    TimeSeriesAggregator,
};
use configuration::PolicySettings;
use core_types::{AnomalyEvent, CategoryTotal, ForecastPoint, MonthlySeries, SalesRecord};
use decision::{DecisionEngine, DecisionVerdict};
use forecast::{rng_from_seed, ForecastEngine, ForecastOutlook};
use ingest::{Preprocessor, RawTable, RecordFilter};
use rand::Rng;
use risk::{RiskAssessment, RiskScorer};

/// Every intermediate and final value of one pipeline run.
///
/// Owned by the caller that requested the run; nothing in it is shared with
/// any other run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub records: usize,
    pub monthly: MonthlySeries,
    pub categories: Vec<CategoryTotal>,
    pub category_shares: RevenueBreakdown,
    pub regions: RevenueBreakdown,
    pub verdict: DecisionVerdict,
    pub forecast: Vec<ForecastPoint>,
    pub outlook: ForecastOutlook,
    pub risk: RiskAssessment,
    pub anomalies: Vec<AnomalyEvent>,
    pub kpis: KpiReport,
    pub bundle: ResultBundle,
}

/// The sequential analytics pipeline.
///
/// preprocess → aggregate → {rank, decide, forecast → risk, detect, summarize} → compose.
/// Each stage receives only the typed outputs of the stages it depends on.
#[derive(Debug)]
pub struct Pipeline {
    preprocessor: Preprocessor,
    aggregator: TimeSeriesAggregator,
    ranker: CategoryRanker,
    decision: DecisionEngine,
    forecaster: ForecastEngine,
    risk_scorer: RiskScorer,
    anomaly_detector: AnomalyDetector,
    kpi_summarizer: KpiSummarizer,
    composer: SummaryComposer,
}

impl Pipeline {
    /// Wires up every stage from the policy parameters.
    pub fn new(policy: &PolicySettings) -> Result<Self, EngineError> {
        policy
            .validate()
            .map_err(|e| EngineError::Configuration(e.to_string()))?;

        Ok(Self {
            preprocessor: Preprocessor::new(),
            aggregator: TimeSeriesAggregator::new(),
            ranker: CategoryRanker::new(),
            decision: DecisionEngine::new(),
            forecaster: ForecastEngine::new(policy.horizon_months, policy.default_volatility),
            risk_scorer: RiskScorer::new(policy)?,
            anomaly_detector: AnomalyDetector::new(policy.z_score_threshold),
            kpi_summarizer: KpiSummarizer::new(),
            composer: SummaryComposer::new(),
        })
    }

    /// Validates a raw table, applies the filter, then runs the analysis.
    pub fn run_table(
        &self,
        table: &RawTable,
        filter: &RecordFilter,
        seed: Option<u64>,
    ) -> Result<AnalysisRun, EngineError> {
        let records = self.preprocessor.process(table)?;
        let records = filter.apply(&records);
        self.run(&records, seed)
    }

    /// Runs the analysis with a forecast generator built from `seed`.
    pub fn run(&self, records: &[SalesRecord], seed: Option<u64>) -> Result<AnalysisRun, EngineError> {
        let mut rng = rng_from_seed(seed);
        self.run_with_rng(records, &mut rng)
    }

    /// Runs the analysis with an injected forecast generator.
    #[tracing::instrument(name = "pipeline_run", skip(self, records, rng), fields(records = records.len()))]
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        records: &[SalesRecord],
        rng: &mut R,
    ) -> Result<AnalysisRun, EngineError> {
        if records.is_empty() {
            return Err(EngineError::InsufficientData(
                "there are no sales records to analyze".to_string(),
            ));
        }

        // 1. Aggregate
        let monthly = self.aggregator.aggregate(records)?;
        tracing::info!(months = monthly.len(), "Monthly series built.");

        // 2. Rank
        let categories = self.ranker.rank(records)?;
        let category_shares = self.ranker.breakdown(records, Dimension::Category)?;
        let regions = self.ranker.breakdown(records, Dimension::Region)?;

        // 3. Decide
        let verdict = self.decision.evaluate(&monthly)?;

        // 4. Forecast, then score risk against it
        let forecast = self.forecaster.project(&monthly, rng)?;
        let outlook = ForecastOutlook::from_points(&forecast);
        let risk = self.risk_scorer.assess(&monthly, &forecast)?;

        // 5. Detect and summarize
        let anomalies = self.anomaly_detector.detect(&monthly)?;
        let kpis = self.kpi_summarizer.summarize(&monthly)?;

        // 6. Compose
        let bundle = self.composer.compose(SummaryInputs {
            verdict: &verdict,
            ranking: &categories,
            risk: &risk,
            outlook,
            horizon_months: self.forecaster.horizon(),
            kpis: &kpis,
            anomalies: &anomalies,
        })?;

        tracing::info!(
            health = %bundle.business_health(),
            risk = %risk.level,
            score = risk.score,
            anomalies = anomalies.len(),
            "Pipeline run complete."
        );

        Ok(AnalysisRun {
            records: records.len(),
            monthly,
            categories,
            category_shares,
            regions,
            verdict,
            forecast,
            outlook,
            risk,
            anomalies,
            kpis,
            bundle,
        })
    }
}
