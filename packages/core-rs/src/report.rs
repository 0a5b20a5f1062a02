use crate::aggregate::Statistics;
use crate::config::ScoringConfig;
use crate::export::ExportRow;
use crate::types::ClassifiedSite;
use serde::{Deserialize, Serialize};

/// Everything the report and export layers need, already ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub scoring_config: ScoringConfig,
    pub statistics: Statistics,
    pub sites: Vec<ClassifiedSite>,
}

impl ViewModel {
    pub fn top_sites(&self, count: usize) -> &[ClassifiedSite] {
        &self.sites[..count.min(self.sites.len())]
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.sites.iter().map(ExportRow::from).collect()
    }
}

pub fn build_view_model(
    sorted_sites: Vec<ClassifiedSite>,
    statistics: Statistics,
    config: &ScoringConfig,
) -> ViewModel {
    ViewModel {
        scoring_config: *config,
        statistics,
        sites: sorted_sites,
    }
}
