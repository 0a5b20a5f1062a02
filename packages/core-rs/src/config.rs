use crate::error::ConfigLoadError;
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PUBLIC_SITE_WEIGHT: i64 = 3;
pub const DEFAULT_EEEU_PERMISSIONS_WEIGHT: i64 = 3;
pub const DEFAULT_EVERYONE_PERMISSIONS_WEIGHT: i64 = 3;
pub const DEFAULT_ANYONE_LINKS_WEIGHT: i64 = 2;
pub const DEFAULT_NO_SENSITIVITY_LABEL_WEIGHT: i64 = 2;
pub const DEFAULT_HIGH_USER_COUNT_WEIGHT: i64 = 2;
pub const DEFAULT_USER_COUNT_THRESHOLD: u64 = 500;

/// Weights and threshold for one analysis run.
///
/// Fields are read-only: a customised config is a new value built with
/// [`ScoringConfig::with_overrides`]. Serialises with the same names the
/// config file uses, so the report echo and the file read the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(rename = "PublicSite")]
    public_site: i64,
    #[serde(rename = "EEEUPermissions")]
    eeeu_permissions: i64,
    #[serde(rename = "EveryonePermissions")]
    everyone_permissions: i64,
    #[serde(rename = "AnyoneLinks")]
    anyone_links: i64,
    #[serde(rename = "NoSensitivityLabel")]
    no_sensitivity_label: i64,
    #[serde(rename = "HighUserCount")]
    high_user_count: i64,
    #[serde(rename = "UserCountThreshold")]
    user_count_threshold: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            public_site: DEFAULT_PUBLIC_SITE_WEIGHT,
            eeeu_permissions: DEFAULT_EEEU_PERMISSIONS_WEIGHT,
            everyone_permissions: DEFAULT_EVERYONE_PERMISSIONS_WEIGHT,
            anyone_links: DEFAULT_ANYONE_LINKS_WEIGHT,
            no_sensitivity_label: DEFAULT_NO_SENSITIVITY_LABEL_WEIGHT,
            high_user_count: DEFAULT_HIGH_USER_COUNT_WEIGHT,
            user_count_threshold: DEFAULT_USER_COUNT_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    pub fn with_overrides(&self, overrides: &ScoringOverrides) -> Self {
        Self {
            public_site: overrides.public_site.unwrap_or(self.public_site),
            eeeu_permissions: overrides.eeeu_permissions.unwrap_or(self.eeeu_permissions),
            everyone_permissions: overrides
                .everyone_permissions
                .unwrap_or(self.everyone_permissions),
            anyone_links: overrides.anyone_links.unwrap_or(self.anyone_links),
            no_sensitivity_label: overrides
                .no_sensitivity_label
                .unwrap_or(self.no_sensitivity_label),
            high_user_count: overrides.high_user_count.unwrap_or(self.high_user_count),
            user_count_threshold: overrides
                .user_count_threshold
                .unwrap_or(self.user_count_threshold),
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn public_site(&self) -> i64 {
        self.public_site
    }

    pub fn eeeu_permissions(&self) -> i64 {
        self.eeeu_permissions
    }

    pub fn everyone_permissions(&self) -> i64 {
        self.everyone_permissions
    }

    pub fn anyone_links(&self) -> i64 {
        self.anyone_links
    }

    pub fn no_sensitivity_label(&self) -> i64 {
        self.no_sensitivity_label
    }

    pub fn high_user_count(&self) -> i64 {
        self.high_user_count
    }

    pub fn user_count_threshold(&self) -> u64 {
        self.user_count_threshold
    }
}

/// Partial config as read from a weights file or command-line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringOverrides {
    #[serde(rename = "PublicSite", alias = "public_site", default)]
    pub public_site: Option<i64>,
    #[serde(rename = "EEEUPermissions", alias = "eeeu_permissions", default)]
    pub eeeu_permissions: Option<i64>,
    #[serde(
        rename = "EveryonePermissions",
        alias = "everyone_permissions",
        default
    )]
    pub everyone_permissions: Option<i64>,
    #[serde(rename = "AnyoneLinks", alias = "anyone_links", default)]
    pub anyone_links: Option<i64>,
    #[serde(rename = "NoSensitivityLabel", alias = "no_sensitivity_label", default)]
    pub no_sensitivity_label: Option<i64>,
    #[serde(rename = "HighUserCount", alias = "high_user_count", default)]
    pub high_user_count: Option<i64>,
    #[serde(rename = "UserCountThreshold", alias = "user_count_threshold", default)]
    pub user_count_threshold: Option<u64>,
}

impl ScoringOverrides {
    /// Layers `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ScoringOverrides) -> Self {
        Self {
            public_site: other.public_site.or(self.public_site),
            eeeu_permissions: other.eeeu_permissions.or(self.eeeu_permissions),
            everyone_permissions: other.everyone_permissions.or(self.everyone_permissions),
            anyone_links: other.anyone_links.or(self.anyone_links),
            no_sensitivity_label: other.no_sensitivity_label.or(self.no_sensitivity_label),
            high_user_count: other.high_user_count.or(self.high_user_count),
            user_count_threshold: other.user_count_threshold.or(self.user_count_threshold),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub fn parse_overrides(path: &Path, contents: &str) -> Result<ScoringOverrides, ConfigLoadError> {
    toml::from_str(contents).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_overrides(path: &Path) -> Result<ScoringOverrides, ConfigLoadError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_overrides(path, &contents)
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(config_dir()?.join("sharescan").join("weights.toml"))
}

/// Resolves the weights file to use. An explicit path must exist; the per-user
/// default is only read when present.
pub fn discover_overrides(explicit: Option<&Path>) -> Result<ScoringOverrides, ConfigLoadError> {
    if let Some(path) = explicit {
        tracing::debug!(path = %path.display(), "loading scoring config");
        return load_overrides(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading default scoring config");
            load_overrides(&path)
        }
        _ => Ok(ScoringOverrides::default()),
    }
}
