use crate::html::render_report;
use crate::input::{parse_rows, InputFormat};
use crate::summary::TOP_SITES;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sharescan_core::{
    discover_overrides, export_csv, export_json, run_analysis, AnalysisOutcome,
    RiskCategoryTable, ScoringConfig, ScoringOverrides, SourceInfo,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
    Csv,
    All,
}

impl OutputFormat {
    fn includes(self, other: OutputFormat) -> bool {
        self == OutputFormat::All || self == other
    }
}

#[derive(Debug, Parser)]
#[command(name = "sharescan")]
#[command(about = "Score collaboration sites by sharing exposure and build a risk report")]
#[command(version)]
pub struct Cli {
    /// Site permissions export (.csv or .json)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory the report files are written to
    #[arg(long, short, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Weights file (TOML); defaults to <config dir>/sharescan/weights.toml when present
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report files to write
    #[arg(long, short, value_enum, default_value_t = OutputFormat::All)]
    pub format: OutputFormat,

    /// Number of sites listed in the console summary
    #[arg(long, default_value_t = TOP_SITES)]
    pub top: usize,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub public_site: Option<i64>,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub eeeu_permissions: Option<i64>,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub everyone_permissions: Option<i64>,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub anyone_links: Option<i64>,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub no_sensitivity_label: Option<i64>,

    #[arg(
        long,
        value_name = "N",
        allow_negative_numbers = true,
        help_heading = "Weights"
    )]
    pub high_user_count: Option<i64>,

    /// Users with access at or above this count trigger the high-user-count factor
    #[arg(long, value_name = "N", help_heading = "Weights")]
    pub user_count_threshold: Option<u64>,

    /// Debug-level logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn flag_overrides(&self) -> ScoringOverrides {
        ScoringOverrides {
            public_site: self.public_site,
            eeeu_permissions: self.eeeu_permissions,
            everyone_permissions: self.everyone_permissions,
            anyone_links: self.anyone_links,
            no_sensitivity_label: self.no_sensitivity_label,
            high_user_count: self.high_user_count,
            user_count_threshold: self.user_count_threshold,
        }
    }

    pub fn scoring_config(&self) -> Result<ScoringConfig> {
        let file = discover_overrides(self.config.as_deref())?;
        let overrides = file.merge(self.flag_overrides());
        let config = ScoringConfig::default().with_overrides(&overrides);
        if !overrides.is_empty() {
            tracing::info!(?config, "using custom scoring weights");
        }
        Ok(config)
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub source: SourceInfo,
    pub outcome: AnalysisOutcome,
    pub written: Vec<PathBuf>,
}

fn report_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "sites".to_string())
}

fn write_output(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(path)
}

pub fn run(cli: &Cli) -> Result<RunReport> {
    let format = InputFormat::from_path(&cli.input)?;
    let config = cli.scoring_config()?;
    let table = RiskCategoryTable::reference();

    let (source, data) = SourceInfo::read(&cli.input)
        .with_context(|| format!("Failed to read input {}", cli.input.display()))?;
    tracing::info!(
        file = %source.file_name,
        sha256 = %source.short_digest(),
        bytes = source.size_bytes,
        "loaded input"
    );

    let rows = parse_rows(format, &data)
        .with_context(|| format!("Failed to parse {}", cli.input.display()))?;
    let outcome = run_analysis(&rows, &config, &table)?;

    fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("Failed to create output directory {}", cli.output_dir.display())
    })?;

    let stem = report_stem(&cli.input);
    let dir = &cli.output_dir;
    let mut written = Vec::new();
    let view = &outcome.view;

    if cli.format.includes(OutputFormat::Html) {
        let html = render_report(view, &source)?;
        written.push(write_output(dir, &format!("{stem}-risk-report.html"), &html)?);
    }
    if cli.format.includes(OutputFormat::Json) {
        let json = export_json(&view.sites)?;
        written.push(write_output(dir, &format!("{stem}-risk-report.json"), &json)?);
    }
    if cli.format.includes(OutputFormat::Csv) {
        let csv = export_csv(&view.sites)?;
        written.push(write_output(dir, &format!("{stem}-risk-report.csv"), &csv)?);
    }

    Ok(RunReport {
        source,
        outcome,
        written,
    })
}
