//! Turns loosely-typed input rows into [`SiteRecord`]s.
//!
//! Column names are matched case-insensitively with spaces, `_` and `-`
//! ignored, so `EEEU Permission Count`, `eeeu_permission_count` and
//! `EEEUPermissionCount` all land on the same field. Bad cells never fail a
//! row: they fall back to the field's safe default and leave a warning.

use crate::types::{Privacy, RawRow, SiteIdentity, SiteRecord};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const NAME_COLUMNS: &[&str] = &["sitename", "title", "name", "displayname"];
const URL_COLUMNS: &[&str] = &["url", "siteurl"];
const TEMPLATE_COLUMNS: &[&str] = &["template", "sitetemplate", "templatename"];
const ADMIN_COLUMNS: &[&str] = &["siteadmin", "primaryadmin", "admin", "owner"];
const TENANT_ID_COLUMNS: &[&str] = &["tenantid"];
const SITE_ID_COLUMNS: &[&str] = &["siteid", "id"];
const CREATED_COLUMNS: &[&str] = &["created", "createddate", "createdtime"];
const LAST_MODIFIED_COLUMNS: &[&str] = &["lastmodified", "lastmodifieddate", "lastmodifiedtime"];
const PRIVACY_COLUMNS: &[&str] = &["privacy", "siteprivacy"];
const SENSITIVITY_COLUMNS: &[&str] = &["sensitivity", "sensitivitylabel", "sitesensitivity"];
const EEEU_COLUMNS: &[&str] = &["eeeupermissioncount", "eeeucount", "eeeu"];
const EVERYONE_COLUMNS: &[&str] = &[
    "everyonepermissioncount",
    "everyonepermissionscount",
    "everyonecount",
    "everyone",
];
const ANYONE_LINK_COLUMNS: &[&str] = &[
    "anyonelinkcount",
    "anyonelinkscount",
    "anyonelinks",
    "anonymouslinkcount",
];
const USER_COUNT_COLUMNS: &[&str] = &[
    "numberofusershavingaccess",
    "usercount",
    "userswithaccess",
    "users",
];

/// Scoring-relevant count fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CountField {
    EeeuCount,
    EveryoneCount,
    AnyoneLinkCount,
    UserCount,
}

impl CountField {
    fn columns(self) -> &'static [&'static str] {
        match self {
            CountField::EeeuCount => EEEU_COLUMNS,
            CountField::EveryoneCount => EVERYONE_COLUMNS,
            CountField::AnyoneLinkCount => ANYONE_LINK_COLUMNS,
            CountField::UserCount => USER_COUNT_COLUMNS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CountField::EeeuCount => "EEEU permission count",
            CountField::EveryoneCount => "Everyone permission count",
            CountField::AnyoneLinkCount => "Anyone link count",
            CountField::UserCount => "Number of users having access",
        }
    }
}

/// A scoring field that was present but could not be read. The row was still
/// scored, with the field treated as 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MalformedRowWarning {
    pub row: usize,
    pub field: CountField,
    pub value: String,
}

impl fmt::Display for MalformedRowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: {} value {:?} is not a non-negative number, using 0",
            self.row + 1,
            self.field.label(),
            self.value
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    pub records: Vec<SiteRecord>,
    pub warnings: Vec<MalformedRowWarning>,
}

fn normalize_column(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn lookup<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|alias| {
        row.iter()
            .find(|(key, _)| normalize_column(key) == *alias)
            .map(|(_, value)| value)
    })
}

fn text_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn text_field(row: &RawRow, aliases: &[&str]) -> String {
    lookup(row, aliases).map(text_value).unwrap_or_default()
}

/// `u64::MAX as f64` rounds up to 2^64, so anything at or past it would saturate.
fn count_from_float(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 {
        Some(value.trunc() as u64)
    } else {
        None
    }
}

/// `Ok(0)` for an absent or empty cell, `Err(())` for a cell that holds
/// something other than a non-negative number.
fn parse_count(value: Option<&Value>) -> Result<u64, ()> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(count_from_float))
            .ok_or(()),
        Some(Value::String(text)) => {
            let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                return Ok(0);
            }
            cleaned
                .parse::<u64>()
                .ok()
                .or_else(|| cleaned.parse::<f64>().ok().and_then(count_from_float))
                .ok_or(())
        }
        Some(_) => Err(()),
    }
}

fn count_field(
    index: usize,
    row: &RawRow,
    field: CountField,
    warnings: &mut Vec<MalformedRowWarning>,
) -> u64 {
    let value = lookup(row, field.columns());
    match parse_count(value) {
        Ok(count) => count,
        Err(()) => {
            let warning = MalformedRowWarning {
                row: index,
                field,
                value: value.map(text_value).unwrap_or_default(),
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
            0
        }
    }
}

pub fn coerce_row(index: usize, row: &RawRow) -> (SiteRecord, Vec<MalformedRowWarning>) {
    let mut warnings = Vec::new();

    let identity = SiteIdentity {
        name: text_field(row, NAME_COLUMNS),
        url: text_field(row, URL_COLUMNS),
        template: text_field(row, TEMPLATE_COLUMNS),
        site_admin: text_field(row, ADMIN_COLUMNS),
        tenant_id: text_field(row, TENANT_ID_COLUMNS),
        site_id: text_field(row, SITE_ID_COLUMNS),
        created: text_field(row, CREATED_COLUMNS),
        last_modified: text_field(row, LAST_MODIFIED_COLUMNS),
    };

    let record = SiteRecord {
        identity,
        privacy: Privacy::parse(&text_field(row, PRIVACY_COLUMNS)),
        sensitivity_label: text_field(row, SENSITIVITY_COLUMNS),
        eeeu_count: count_field(index, row, CountField::EeeuCount, &mut warnings),
        everyone_count: count_field(index, row, CountField::EveryoneCount, &mut warnings),
        anyone_link_count: count_field(index, row, CountField::AnyoneLinkCount, &mut warnings),
        user_count: count_field(index, row, CountField::UserCount, &mut warnings),
    };

    (record, warnings)
}

pub fn coerce_rows(rows: &[RawRow]) -> IngestOutcome {
    let mut outcome = IngestOutcome {
        records: Vec::with_capacity(rows.len()),
        warnings: Vec::new(),
    };

    for (index, row) in rows.iter().enumerate() {
        let (record, warnings) = coerce_row(index, row);
        outcome.records.push(record);
        outcome.warnings.extend(warnings);
    }

    outcome
}
