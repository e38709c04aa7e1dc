//! Linter name → constructor table
//!
//! Built once at startup and handed to whoever resolves configured linters,
//! so tests can register fakes next to (or instead of) the built-ins.

use super::{cpplint, CommandLinter, Linter};
use crate::error::PipelineError;
use crate::models::LinterSpec;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Builds a linter from its configured spec
pub type LinterFactory = Box<dyn Fn(&LinterSpec) -> Box<dyn Linter>>;

#[derive(Default)]
pub struct LinterRegistry {
    factories: HashMap<String, LinterFactory>,
}

impl LinterRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every supported tool
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("cpplint", |spec| Box::new(cpplint(spec.parameters.clone())));
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&LinterSpec) -> Box<dyn Linter> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Supported linter names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Instantiate the configured linters, in configuration order.
    ///
    /// Names without a factory fall back to a [`CommandLinter`] when the spec
    /// carries a `result_template`; anything else is skipped with a warning.
    pub fn resolve(&self, specs: &[LinterSpec]) -> Result<Vec<Box<dyn Linter>>, PipelineError> {
        let mut linters: Vec<Box<dyn Linter>> = Vec::with_capacity(specs.len());

        for spec in specs {
            if let Some(factory) = self.factories.get(&spec.name) {
                debug!(linter = %spec.name, "Using built-in linter");
                linters.push(factory(spec));
            } else if let Some(linter) = CommandLinter::from_spec(spec) {
                debug!(linter = %spec.name, program = %linter.program(), "Using command linter");
                linters.push(Box::new(linter));
            } else {
                warn!(linter = %spec.name, "Linter isn't supported");
            }
        }

        if linters.is_empty() {
            return Err(PipelineError::NoSupportedLinters);
        }
        Ok(linters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let registry = LinterRegistry::with_builtins();
        assert!(registry.contains("cpplint"));
        assert_eq!(registry.names(), vec!["cpplint"]);
    }

    #[test]
    fn test_unknown_linters_are_skipped() {
        let registry = LinterRegistry::with_builtins();
        let specs = vec![
            LinterSpec::new("eslint", vec![]),
            LinterSpec::new("cpplint", vec!["--quiet".into()]),
        ];
        let linters = registry.resolve(&specs).unwrap();
        assert_eq!(linters.len(), 1);
        assert_eq!(linters[0].name(), "cpplint");
    }

    #[test]
    fn test_no_supported_linters() {
        let registry = LinterRegistry::with_builtins();
        let result = registry.resolve(&[LinterSpec::new("eslint", vec![])]);
        assert!(matches!(result, Err(PipelineError::NoSupportedLinters)));

        let result = registry.resolve(&[]);
        assert!(matches!(result, Err(PipelineError::NoSupportedLinters)));
    }

    #[test]
    fn test_command_fallback_keeps_order() {
        let registry = LinterRegistry::with_builtins();
        let mut custom = LinterSpec::new("clang-tidy", vec![]);
        custom.result_template = Some("warnings generated: ".into());
        let specs = vec![custom, LinterSpec::new("cpplint", vec![])];

        let names: Vec<String> = registry
            .resolve(&specs)
            .unwrap()
            .iter()
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(names, vec!["clang-tidy", "cpplint"]);
    }

    #[test]
    fn test_registered_factory_wins() {
        let mut registry = LinterRegistry::new();
        registry.register("fake", |spec| {
            Box::new(CommandLinter::new(spec.name.clone(), "true", vec![], "n="))
        });
        let linters = registry.resolve(&[LinterSpec::new("fake", vec![])]).unwrap();
        assert_eq!(linters[0].result_template(), b"n=");
    }
}
