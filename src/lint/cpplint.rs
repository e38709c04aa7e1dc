//! cpplint support
//!
//! cpplint prints `Total errors found: N` to stderr and exits 1 when it
//! flags anything. It is pointed at the current directory, after any
//! user-supplied parameters.

use super::CommandLinter;

/// Summary marker printed by cpplint
pub const CPPLINT_RESULT_TEMPLATE: &str = "Total errors found: ";

/// A cpplint run over the checked-out tree
pub fn cpplint(mut parameters: Vec<String>) -> CommandLinter {
    parameters.push("./".to_string());
    CommandLinter::new("cpplint", "cpplint", parameters, CPPLINT_RESULT_TEMPLATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::{LintOutcome, LintRunResult, Linter, RunError};

    #[test]
    fn test_targets_current_directory() {
        let linter = cpplint(vec!["--recursive".into()]);
        assert_eq!(linter.name(), "cpplint");
        assert_eq!(linter.parameters(), ["--recursive", "./"]);
    }

    #[test]
    fn test_parses_summary() {
        let linter = cpplint(Vec::new());
        let result = LintRunResult::failure(
            "Done processing ./a.cpp\nTotal errors found: 12\n",
            RunError::Exit { code: Some(1) },
        );
        assert_eq!(linter.parse_output(&result).unwrap(), LintOutcome::Normal(12));
    }
}
