use crate::config::ScoringConfig;
use crate::types::{ScoredSite, SiteRecord};
use serde::Serialize;
use std::fmt;

/// A triggered scoring condition. Variants are listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "factor", rename_all = "camelCase")]
pub enum RiskFactor {
    PublicSite,
    EeeuPermissions { count: u64 },
    EveryonePermissions { count: u64 },
    AnyoneLinks { count: u64 },
    NoSensitivityLabel,
    HighUserCount { users: u64, threshold: u64 },
}

impl RiskFactor {
    pub fn weight(&self, config: &ScoringConfig) -> i64 {
        match self {
            RiskFactor::PublicSite => config.public_site(),
            RiskFactor::EeeuPermissions { .. } => config.eeeu_permissions(),
            RiskFactor::EveryonePermissions { .. } => config.everyone_permissions(),
            RiskFactor::AnyoneLinks { .. } => config.anyone_links(),
            RiskFactor::NoSensitivityLabel => config.no_sensitivity_label(),
            RiskFactor::HighUserCount { .. } => config.high_user_count(),
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFactor::PublicSite => write!(f, "Public site"),
            RiskFactor::EeeuPermissions { count } => write!(f, "EEEU permissions ({count})"),
            RiskFactor::EveryonePermissions { count } => {
                write!(f, "Everyone permissions ({count})")
            }
            RiskFactor::AnyoneLinks { count } => write!(f, "Anyone links ({count})"),
            RiskFactor::NoSensitivityLabel => write!(f, "No sensitivity label"),
            RiskFactor::HighUserCount { users, threshold } => {
                write!(f, "High user count ({users} users, threshold {threshold})")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    pub score: i64,
    pub reasons: Vec<String>,
}

pub fn triggered_factors(site: &SiteRecord, config: &ScoringConfig) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if site.privacy.is_public() {
        factors.push(RiskFactor::PublicSite);
    }

    if site.eeeu_count > 0 {
        factors.push(RiskFactor::EeeuPermissions {
            count: site.eeeu_count,
        });
    }

    if site.everyone_count > 0 {
        factors.push(RiskFactor::EveryonePermissions {
            count: site.everyone_count,
        });
    }

    if site.anyone_link_count > 0 {
        factors.push(RiskFactor::AnyoneLinks {
            count: site.anyone_link_count,
        });
    }

    if !site.has_sensitivity_label() {
        factors.push(RiskFactor::NoSensitivityLabel);
    }

    if site.user_count >= config.user_count_threshold() {
        factors.push(RiskFactor::HighUserCount {
            users: site.user_count,
            threshold: config.user_count_threshold(),
        });
    }

    factors
}

/// Sum of the weights of every triggered factor, with one reason per factor.
/// A factor weighted 0 still contributes its reason.
pub fn score_site(site: &SiteRecord, config: &ScoringConfig) -> RiskScore {
    let factors = triggered_factors(site, config);
    let score = factors
        .iter()
        .map(|factor| factor.weight(config))
        .fold(0i64, i64::saturating_add);
    let reasons = factors.iter().map(ToString::to_string).collect();

    RiskScore { score, reasons }
}

pub fn score_record(position: usize, record: SiteRecord, config: &ScoringConfig) -> ScoredSite {
    let RiskScore { score, reasons } = score_site(&record, config);
    ScoredSite {
        position,
        record,
        score,
        reasons,
    }
}
