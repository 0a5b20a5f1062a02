use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::CategoryInfo;

/// One input row as handed over by the table reader: column name to cell value.
pub type RawRow = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Privacy {
    Public,
    Private,
    #[default]
    Unset,
    Other(String),
}

impl Privacy {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Privacy::Unset
        } else if trimmed.eq_ignore_ascii_case("public") {
            Privacy::Public
        } else if trimmed.eq_ignore_ascii_case("private") {
            Privacy::Private
        } else {
            Privacy::Other(trimmed.to_string())
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Privacy::Public)
    }

    /// Display text; empty for an unset privacy state.
    pub fn label(&self) -> &str {
        match self {
            Privacy::Public => "Public",
            Privacy::Private => "Private",
            Privacy::Unset => "",
            Privacy::Other(value) => value,
        }
    }
}

impl From<String> for Privacy {
    fn from(value: String) -> Self {
        Privacy::parse(&value)
    }
}

impl From<Privacy> for String {
    fn from(value: Privacy) -> Self {
        value.label().to_string()
    }
}

/// Display-only payload. Carried through the pipeline untouched and never read by scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteIdentity {
    pub name: String,
    pub url: String,
    pub template: String,
    pub site_admin: String,
    pub tenant_id: String,
    pub site_id: String,
    pub created: String,
    pub last_modified: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    #[serde(flatten)]
    pub identity: SiteIdentity,
    pub privacy: Privacy,
    pub sensitivity_label: String,
    pub eeeu_count: u64,
    pub everyone_count: u64,
    pub anyone_link_count: u64,
    pub user_count: u64,
}

impl SiteRecord {
    pub fn has_sensitivity_label(&self) -> bool {
        !self.sensitivity_label.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredSite {
    /// Zero-based index of the row in the input; ties in the ranking keep this order.
    pub position: usize,
    #[serde(flatten)]
    pub record: SiteRecord,
    pub score: i64,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedSite {
    #[serde(flatten)]
    pub scored: ScoredSite,
    pub category: CategoryInfo,
}

impl ClassifiedSite {
    pub fn score(&self) -> i64 {
        self.scored.score
    }

    pub fn record(&self) -> &SiteRecord {
        &self.scored.record
    }
}
