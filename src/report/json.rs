//! JSON reporter
//!
//! Writes the record sequence as pretty-printed JSON.

use crate::models::PipelineReport;
use anyhow::{Context, Result};

/// Render report as JSON
pub fn render(report: &PipelineReport) -> Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(report).context("Failed to encode report as JSON")?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn parse(bytes: &[u8]) -> Result<PipelineReport> {
    serde_json::from_slice(bytes).context("Failed to decode JSON report")
}
