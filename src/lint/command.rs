//! Generic command-line linter

use super::{run_command, LintRunResult, Linter};
use crate::models::LinterSpec;
use std::path::Path;

/// Any tool following the "marker + count, or no output" convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLinter {
    name: String,
    program: String,
    parameters: Vec<String>,
    result_template: Vec<u8>,
}

impl CommandLinter {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        parameters: Vec<String>,
        result_template: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            parameters,
            result_template: result_template.into(),
        }
    }

    /// Build from a configured spec. Needs a `result_template`.
    pub fn from_spec(spec: &LinterSpec) -> Option<Self> {
        let template = spec.result_template.as_ref()?;
        let program = spec.command.clone().unwrap_or_else(|| spec.name.clone());
        Some(Self::new(
            spec.name.clone(),
            program,
            spec.parameters.clone(),
            template.as_bytes(),
        ))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

impl Linter for CommandLinter {
    fn name(&self) -> &str {
        &self.name
    }

    fn result_template(&self) -> &[u8] {
        &self.result_template
    }

    fn run(&self, directory: &Path) -> LintRunResult {
        run_command(&self.program, &self.parameters, directory)
    }
}
