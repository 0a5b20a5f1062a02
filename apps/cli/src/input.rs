use anyhow::{bail, Context, Result};
use serde_json::Value;
use sharescan_core::RawRow;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(InputFormat::Csv),
            "json" => Ok(InputFormat::Json),
            _ => bail!(
                "Unsupported input file {}: expected a .csv or .json export",
                path.display()
            ),
        }
    }
}

pub fn parse_rows(format: InputFormat, data: &[u8]) -> Result<Vec<RawRow>> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    match format {
        InputFormat::Csv => parse_csv(data),
        InputFormat::Json => parse_json(data),
    }
}

fn parse_csv(data: &[u8]) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .clone();
    let mut rows = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to read CSV row {}", index + 1))?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.to_string(), Value::String(field.to_string())))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn parse_json(data: &[u8]) -> Result<Vec<RawRow>> {
    serde_json::from_slice(data).context("Expected a JSON array of row objects")
}
