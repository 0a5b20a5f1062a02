use crate::aggregate::aggregate;
use crate::categories::{classify_site, RiskCategoryTable};
use crate::config::ScoringConfig;
use crate::error::ConfigurationError;
use crate::ingest::{coerce_rows, MalformedRowWarning};
use crate::report::{build_view_model, ViewModel};
use crate::risk::score_record;
use crate::types::{ClassifiedSite, RawRow, SiteRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub view: ViewModel,
    pub warnings: Vec<MalformedRowWarning>,
}

/// Scores, classifies, ranks and summarises already-typed records.
pub fn analyze_records(
    records: Vec<SiteRecord>,
    config: &ScoringConfig,
    table: &RiskCategoryTable,
) -> Result<ViewModel, ConfigurationError> {
    let classified = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| classify_site(score_record(position, record, config), table))
        .collect::<Result<Vec<ClassifiedSite>, _>>()?;

    let (sorted, statistics) = aggregate(classified, table);
    Ok(build_view_model(sorted, statistics, config))
}

/// Full run over raw input rows. Malformed cells never abort the run; they
/// are reported back alongside the complete result.
pub fn run_analysis(
    rows: &[RawRow],
    config: &ScoringConfig,
    table: &RiskCategoryTable,
) -> Result<AnalysisOutcome, ConfigurationError> {
    tracing::debug!(
        rows = rows.len(),
        default_weights = config.is_default(),
        "starting analysis"
    );

    let ingest = coerce_rows(rows);
    let view = analyze_records(ingest.records, config, table)?;

    tracing::info!(
        sites = view.statistics.total_sites,
        high_risk = view.statistics.high_risk_sites,
        warnings = ingest.warnings.len(),
        "analysis complete"
    );

    Ok(AnalysisOutcome {
        view,
        warnings: ingest.warnings,
    })
}
