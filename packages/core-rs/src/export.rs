use crate::error::ExportError;
use crate::types::ClassifiedSite;
use serde::{Deserialize, Serialize};

pub const UNNAMED_SITE: &str = "Unnamed Site";
pub const PRIVACY_NOT_SET: &str = "Not Set";
pub const REASON_SEPARATOR: &str = "; ";

/// One flat report row. Keys are the column headers shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Score")]
    pub score: i64,
    #[serde(rename = "Risk Level")]
    pub risk_level: String,
    #[serde(rename = "Site Name")]
    pub site_name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Privacy")]
    pub privacy: String,
    #[serde(rename = "Users")]
    pub users: u64,
    #[serde(rename = "Anyone Links")]
    pub anyone_links: u64,
    #[serde(rename = "EEEU")]
    pub eeeu: u64,
    #[serde(rename = "Everyone")]
    pub everyone: u64,
    #[serde(rename = "Risk Factors")]
    pub risk_factors: String,
}

pub fn display_name(site: &ClassifiedSite) -> &str {
    let name = site.record().identity.name.as_str();
    if name.trim().is_empty() {
        UNNAMED_SITE
    } else {
        name
    }
}

pub fn display_privacy(site: &ClassifiedSite) -> &str {
    let label = site.record().privacy.label();
    if label.is_empty() {
        PRIVACY_NOT_SET
    } else {
        label
    }
}

impl From<&ClassifiedSite> for ExportRow {
    fn from(site: &ClassifiedSite) -> Self {
        let record = site.record();
        Self {
            score: site.score(),
            risk_level: site.category.name.clone(),
            site_name: display_name(site).to_string(),
            url: record.identity.url.clone(),
            privacy: display_privacy(site).to_string(),
            users: record.user_count,
            anyone_links: record.anyone_link_count,
            eeeu: record.eeeu_count,
            everyone: record.everyone_count,
            risk_factors: site.scored.reasons.join(REASON_SEPARATOR),
        }
    }
}

pub fn export_rows(sites: &[ClassifiedSite]) -> Vec<ExportRow> {
    sites.iter().map(ExportRow::from).collect()
}

pub fn export_json(sites: &[ClassifiedSite]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&export_rows(sites))?)
}

pub fn export_csv(sites: &[ClassifiedSite]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in export_rows(sites) {
        writer.serialize(row)?;
    }
    let data = writer
        .into_inner()
        .map_err(|error| ExportError::Io(error.into_error()))?;
    Ok(String::from_utf8(data)?)
}
