//! Linter output aggregation

use super::{LintOutcome, RunError};
use crate::error::LintError;
use memchr::memmem;
use tracing::error;

/// Interpret a linter's output and run status.
///
/// - empty output: [`LintOutcome::NoMatchingFiles`], whatever the run status
/// - output without a run error: `Normal(0)`, the marker is not consulted
/// - output with a run error: the count after `marker`, up to end of output
pub fn aggregate(
    linter: &str,
    output: &[u8],
    run_error: Option<&RunError>,
    marker: &[u8],
) -> Result<LintOutcome, LintError> {
    if output.is_empty() {
        return Ok(LintOutcome::NoMatchingFiles);
    }

    if run_error.is_none() {
        return Ok(LintOutcome::Normal(0));
    }

    let Some(index) = memmem::find(output, marker) else {
        let marker = String::from_utf8_lossy(marker).into_owned();
        error!(linter, result_template = %marker, "Failed to find result template");
        return Err(LintError::OutputParsingFailed {
            linter: linter.to_string(),
            marker,
        });
    };

    let tail = String::from_utf8_lossy(&output[index + marker.len()..]);
    let value = tail.trim();
    value
        .parse::<u64>()
        .map(LintOutcome::Normal)
        .map_err(|source| {
            error!(linter, value, "Failed to convert error count");
            LintError::InvalidCount {
                value: value.to_string(),
                source,
            }
        })
}
