//! Score bands. A table is validated once when built: ranges start at 0, are
//! contiguous, never overlap, and the last one has no upper bound.

use crate::error::ConfigurationError;
use crate::types::{ClassifiedSite, ScoredSite};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDefinition {
    pub name: String,
    pub min_score: i64,
    /// `None` marks the open-ended top band.
    pub max_score: Option<i64>,
    pub color: String,
}

impl CategoryDefinition {
    pub fn new(name: &str, min_score: i64, max_score: Option<i64>, color: &str) -> Self {
        Self {
            name: name.to_string(),
            min_score,
            max_score,
            color: color.to_string(),
        }
    }

    pub fn contains(&self, score: i64) -> bool {
        score >= self.min_score && self.max_score.map_or(true, |max| score <= max)
    }
}

/// The category a site lands in, as carried on each classified row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInfo {
    pub name: String,
    pub color: String,
    /// Position in the table, 0 for the least severe band.
    pub severity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskCategoryTable {
    categories: Vec<CategoryDefinition>,
}

pub fn reference_categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new("No Risk", 0, Some(0), "#2e7d32"),
        CategoryDefinition::new("Low", 1, Some(3), "#7cb342"),
        CategoryDefinition::new("Medium", 4, Some(6), "#f9a825"),
        CategoryDefinition::new("High", 7, Some(9), "#ef6c00"),
        CategoryDefinition::new("Critical", 10, None, "#c62828"),
    ]
}

impl Default for RiskCategoryTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl RiskCategoryTable {
    pub fn new(categories: Vec<CategoryDefinition>) -> Result<Self, ConfigurationError> {
        validate(&categories)?;
        Ok(Self { categories })
    }

    /// No Risk {0}, Low 1-3, Medium 4-6, High 7-9, Critical 10+.
    pub fn reference() -> Self {
        Self {
            categories: reference_categories(),
        }
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    /// Scores below zero (possible with negative weights) fall in the lowest band.
    pub fn classify(&self, score: i64) -> Result<CategoryInfo, ConfigurationError> {
        let lookup = score.max(0);
        self.categories
            .iter()
            .enumerate()
            .find(|(_, category)| category.contains(lookup))
            .map(|(index, category)| CategoryInfo {
                name: category.name.clone(),
                color: category.color.clone(),
                severity: u8::try_from(index).unwrap_or(u8::MAX),
            })
            .ok_or(ConfigurationError::NoCategoryForScore { score })
    }
}

pub fn classify(score: i64, table: &RiskCategoryTable) -> Result<CategoryInfo, ConfigurationError> {
    table.classify(score)
}

pub fn classify_site(
    scored: ScoredSite,
    table: &RiskCategoryTable,
) -> Result<ClassifiedSite, ConfigurationError> {
    let category = table.classify(scored.score)?;
    Ok(ClassifiedSite { scored, category })
}

impl ClassifiedSite {
    pub fn reclassify(
        &self,
        table: &RiskCategoryTable,
    ) -> Result<ClassifiedSite, ConfigurationError> {
        classify_site(self.scored.clone(), table)
    }
}

fn validate(categories: &[CategoryDefinition]) -> Result<(), ConfigurationError> {
    let first = categories.first().ok_or(ConfigurationError::EmptyTable)?;
    if first.min_score != 0 {
        return Err(ConfigurationError::DoesNotStartAtZero {
            name: first.name.clone(),
            min: first.min_score,
        });
    }

    let mut names = HashSet::new();
    for category in categories {
        if !names.insert(category.name.as_str()) {
            return Err(ConfigurationError::DuplicateName {
                name: category.name.clone(),
            });
        }
        if let Some(max) = category.max_score {
            if max < category.min_score {
                return Err(ConfigurationError::InvertedRange {
                    name: category.name.clone(),
                    min: category.min_score,
                    max,
                });
            }
        }
    }

    for pair in categories.windows(2) {
        let (lower, upper) = (&pair[0], &pair[1]);
        let Some(lower_max) = lower.max_score else {
            return Err(ConfigurationError::UnboundedBeforeEnd {
                name: lower.name.clone(),
            });
        };
        if upper.min_score <= lower_max {
            return Err(ConfigurationError::Overlap {
                lower: lower.name.clone(),
                upper: upper.name.clone(),
                at: upper.min_score,
            });
        }
        if upper.min_score > lower_max.saturating_add(1) {
            return Err(ConfigurationError::Gap {
                lower: lower.name.clone(),
                upper: upper.name.clone(),
                from: lower_max.saturating_add(1),
                to: upper.min_score - 1,
            });
        }
    }

    if let Some(last) = categories.last() {
        if let Some(max) = last.max_score {
            return Err(ConfigurationError::BoundedTop {
                name: last.name.clone(),
                max,
            });
        }
    }

    Ok(())
}
