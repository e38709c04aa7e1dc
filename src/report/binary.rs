//! Binary reporter
//!
//! bitcode's serde encoding of the record sequence. Smaller and faster to
//! load than JSON for long histories.

use crate::models::PipelineReport;
use anyhow::{Context, Result};

pub fn render(report: &PipelineReport) -> Result<Vec<u8>> {
    bitcode::serialize(report).context("Failed to encode report with bitcode")
}

pub fn parse(bytes: &[u8]) -> Result<PipelineReport> {
    bitcode::deserialize(bytes).context("Failed to decode bitcode report")
}
