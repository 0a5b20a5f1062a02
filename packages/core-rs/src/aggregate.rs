use crate::categories::RiskCategoryTable;
use crate::types::ClassifiedSite;
use serde::{Deserialize, Serialize};

/// Sites scoring at or above this are counted as high risk in the summary.
pub const HIGH_RISK_THRESHOLD: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    pub name: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_sites: usize,
    pub high_risk_sites: usize,
    pub public_sites: usize,
    pub anyone_link_sites: usize,
    /// Mean score rounded to one decimal place.
    pub average_score: f64,
    pub max_score: i64,
    /// One entry per table category, in table order, including empty ones.
    pub category_counts: Vec<CategoryCount>,
}

impl Statistics {
    pub fn empty(table: &RiskCategoryTable) -> Self {
        Self {
            total_sites: 0,
            high_risk_sites: 0,
            public_sites: 0,
            anyone_link_sites: 0,
            average_score: 0.0,
            max_score: 0,
            category_counts: zeroed_counts(table),
        }
    }

    pub fn category_count(&self, name: &str) -> usize {
        self.category_counts
            .iter()
            .find(|entry| entry.name == name)
            .map_or(0, |entry| entry.count)
    }
}

fn zeroed_counts(table: &RiskCategoryTable) -> Vec<CategoryCount> {
    table
        .categories()
        .iter()
        .map(|category| CategoryCount {
            name: category.name.clone(),
            color: category.color.clone(),
            count: 0,
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn compute_statistics(sites: &[ClassifiedSite], table: &RiskCategoryTable) -> Statistics {
    if sites.is_empty() {
        return Statistics::empty(table);
    }

    let mut stats = Statistics::empty(table);
    let mut total_score: i128 = 0;
    let mut max_score = i64::MIN;

    for site in sites {
        let record = site.record();
        let score = site.score();

        total_score += i128::from(score);
        max_score = max_score.max(score);

        if score >= HIGH_RISK_THRESHOLD {
            stats.high_risk_sites += 1;
        }
        if record.privacy.is_public() {
            stats.public_sites += 1;
        }
        if record.anyone_link_count > 0 {
            stats.anyone_link_sites += 1;
        }

        match stats
            .category_counts
            .iter_mut()
            .find(|entry| entry.name == site.category.name)
        {
            Some(entry) => entry.count += 1,
            None => stats.category_counts.push(CategoryCount {
                name: site.category.name.clone(),
                color: site.category.color.clone(),
                count: 1,
            }),
        }
    }

    stats.total_sites = sites.len();
    stats.max_score = max_score;
    stats.average_score = round_one_decimal(total_score as f64 / sites.len() as f64);
    stats
}

/// Orders sites by score, highest first. Equal scores keep their input order.
pub fn rank_sites(mut sites: Vec<ClassifiedSite>) -> Vec<ClassifiedSite> {
    // `sort_by` is stable; the position tiebreak keeps callers that pass
    // shuffled rows deterministic as well.
    sites.sort_by(|a, b| {
        b.score()
            .cmp(&a.score())
            .then_with(|| a.scored.position.cmp(&b.scored.position))
    });
    sites
}

pub fn aggregate(
    sites: Vec<ClassifiedSite>,
    table: &RiskCategoryTable,
) -> (Vec<ClassifiedSite>, Statistics) {
    let statistics = compute_statistics(&sites, table);
    let sorted = rank_sites(sites);
    tracing::debug!(
        total = statistics.total_sites,
        high_risk = statistics.high_risk_sites,
        max_score = statistics.max_score,
        "aggregated site scores"
    );
    (sorted, statistics)
}
