//! Linter process execution
//!
//! Runs a tool as a subprocess and captures everything it prints. Tools such
//! as cpplint write their summary to stderr, so stdout and stderr are joined
//! into one buffer (stdout first, so the summary stays at the end).

use super::{LintRunResult, RunError};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Run `program` with `args` inside `cwd` and wait for it to finish.
///
/// A tool that cannot be started yields empty output plus a
/// [`RunError::Spawn`], which aggregates as "no matching files".
pub fn run_command(program: &str, args: &[String], cwd: &Path) -> LintRunResult {
    debug!("Running {} {:?} in {}", program, args, cwd.display());

    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output();

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                format!("{} not found. Please install it first.", program)
            } else {
                format!("Failed to run {}: {}", program, e)
            };
            warn!("{}", message);
            return LintRunResult::failure(Vec::<u8>::new(), RunError::Spawn { message });
        }
    };

    let mut combined = output.stdout;
    combined.extend_from_slice(&output.stderr);

    if output.status.success() {
        LintRunResult::success(combined)
    } else {
        LintRunResult::failure(
            combined,
            RunError::Exit {
                code: output.status.code(),
            },
        )
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> LintRunResult {
        run_command("sh", &["-c".to_string(), script.to_string()], Path::new("."))
    }

    #[test]
    fn test_success_without_output() {
        let result = sh("true");
        assert!(result.output.is_empty());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_stderr_follows_stdout() {
        let result = sh("echo out; echo 'Total errors found: 2' >&2; exit 1");
        assert_eq!(result.output, b"out\nTotal errors found: 2\n");
        assert_eq!(result.error, Some(RunError::Exit { code: Some(1) }));
    }

    #[test]
    fn test_missing_program() {
        let result = run_command("git-stories-no-such-linter", &[], Path::new("."));
        assert!(result.output.is_empty());
        assert!(matches!(result.error, Some(RunError::Spawn { .. })));
    }
}
