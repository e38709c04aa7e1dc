//! Report serialization
//!
//! Supports two encodings of the same record sequence:
//! - `json` - pretty-printed JSON, easy to inspect and diff
//! - `binary` - compact bitcode encoding for the renderer

mod binary;
mod json;

use crate::models::PipelineReport;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Supported report encodings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Binary,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "binary" | "bin" | "bitcode" => Ok(ReportFormat::Binary),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: json, binary",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Binary => write!(f, "binary"),
        }
    }
}

/// Encode a report in the specified format
pub fn render(report: &PipelineReport, format: ReportFormat) -> Result<Vec<u8>> {
    match format {
        ReportFormat::Json => json::render(report),
        ReportFormat::Binary => binary::render(report),
    }
}

/// Decode a report previously written with [`render`]
pub fn parse(bytes: &[u8], format: ReportFormat) -> Result<PipelineReport> {
    match format {
        ReportFormat::Json => json::parse(bytes),
        ReportFormat::Binary => binary::parse(bytes),
    }
}

/// Write the report to `path`.
///
/// Goes through a temporary sibling file renamed into place, so `path` is
/// either absent or complete.
pub fn write_report(report: &PipelineReport, format: ReportFormat, path: &Path) -> Result<()> {
    let bytes = render(report, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let written = std::fs::File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(&bytes)?;
            file.sync_all()
        })
        .and_then(|_| std::fs::rename(&tmp_path, path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("Failed to write results to {}", path.display()));
    }

    debug!(bytes = bytes.len(), "Report encoded as {}", format);
    info!(path = %path.display(), commits = report.len(), "Results written");
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{ChangeSet, CommitRecord};

    /// Build a small two-commit report for reporter tests
    pub(crate) fn test_report() -> PipelineReport {
        let mut first = ChangeSet::default();
        first.added.insert("a.cpp".into());
        let mut second = ChangeSet::default();
        second.added.insert("b.cpp".into());
        second.deleted.insert("a.cpp".into());

        let mut report = PipelineReport::default();
        report.push(CommitRecord::new("c1", first, 0));
        report.push(CommitRecord::new("c2", second, 4));
        report
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("BINARY".parse::<ReportFormat>().unwrap(), ReportFormat::Binary);
        assert!("proto".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::Binary.to_string(), "binary");
    }

    #[test]
    fn test_write_report_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("output.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "stale").unwrap();

        write_report(&test_report(), ReportFormat::Json, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(parse(&written, ReportFormat::Json).unwrap(), test_report());
        assert!(!dir.path().join("out").join("output.json.tmp").exists());
    }

    #[test]
    fn test_binary_file_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.gs");
        write_report(&test_report(), ReportFormat::Binary, &path).unwrap();

        let decoded = parse(&std::fs::read(&path).unwrap(), ReportFormat::Binary).unwrap();
        assert_eq!(decoded.commits[1].errors, 4);
        assert_eq!(decoded.commits[1].deleted, vec!["a.cpp"]);
    }
}
