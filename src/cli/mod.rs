//! CLI definition and handler

use anyhow::Result;
use clap::Parser;
use console::style;
use git_stories::config::Config;
use git_stories::report::ReportFormat;
use git_stories::runner::Worker;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{error, info};

/// git-stories - git history visualization tool
///
/// Clones the configured repository, replays every commit oldest first,
/// runs the configured linters on each snapshot and writes a per-commit
/// report of file changes and lint errors.
#[derive(Parser, Debug)]
#[command(name = "git-stories")]
#[command(
    version,
    about = "Replay a repository's history through your linters",
    after_help = "\
Examples:
  git-stories parameters.json                      Run with a JSON config
  git-stories stories.toml -o history.gs -f binary Binary report for the renderer
  git-stories parameters.json --keep-workdir       Keep the clone for inspection"
)]
pub struct Cli {
    /// Path to the configuration file (JSON, TOML or YAML)
    pub config: PathBuf,

    /// Report path (overrides output.path)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Report format: json, binary (overrides output.format)
    #[arg(long, short = 'f', value_parser = ["json", "binary"])]
    pub format: Option<String>,

    /// Scratch directory to clone into (overrides workdir)
    #[arg(long)]
    pub workdir: Option<PathBuf>,

    /// Keep the scratch directory after a successful run
    #[arg(long)]
    pub keep_workdir: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

impl Cli {
    /// Load the config file and apply flag overrides
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(&self.config)?;
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(format) = &self.format {
            config.output.format = format.parse::<ReportFormat>()?;
        }
        if let Some(workdir) = &self.workdir {
            config.workdir = workdir.clone();
        }
        Ok(config)
    }
}

/// Create bar progress style
fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ")
}

pub fn run(cli: Cli) -> Result<()> {
    info!("git-stories called");
    let config = cli.load_config()?;

    let bar = ProgressBar::new(0);
    bar.set_style(create_bar_style());

    let worker = Worker::new(config)?
        .keep_workdir(cli.keep_workdir)
        .with_progress(bar);

    match worker.work() {
        Ok(summary) => {
            println!(
                "{} {} commits written to {} ({})",
                style("✓").green().bold(),
                style(summary.report.len()).bold(),
                summary.output_path.display(),
                summary.format
            );
            if let Some(errors) = summary.report.latest_errors() {
                println!("  lint errors at HEAD: {}", style(errors).yellow());
            }
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            worker.error_cleanup();
            Err(e)
        }
    }
}
