//! Command-line surface

use crate::demo::run_demo;
use crate::fixtures::{load_sheet, sample_sheet};
use crate::simulator::SimulatorConfig;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sheet_model::{Participant, Role};
use sheet_session::SheetConfig;
use std::path::PathBuf;

/// Role-aware daily sheet collaboration model
#[derive(Debug, Parser)]
#[command(name = "daily-sheet", version, about)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk through a sheet as one participant
    Demo(DemoArgs),
    /// Run the randomized rule checker
    Simulate(SimulateArgs),
}

/// Arguments of `demo`
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Participant name
    #[arg(long, default_value = "Kim")]
    pub name: String,

    /// Participant role (mentor or student)
    #[arg(long, default_value = "mentor")]
    pub role: Role,

    /// Print read models as JSON
    #[arg(long)]
    pub json: bool,

    /// Session config (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sheet snapshot (JSON) instead of the bundled sample
    #[arg(long)]
    pub sheet: Option<PathBuf>,
}

impl DemoArgs {
    /// Run the walkthrough and render its report
    ///
    /// # Errors
    /// Unreadable config or sheet files, or JSON encoding failure.
    pub fn execute(&self) -> anyhow::Result<String> {
        let config = match &self.config {
            Some(path) => SheetConfig::load(path)?,
            None => SheetConfig::default(),
        };
        let sheet = match &self.sheet {
            Some(path) => load_sheet(path)?,
            None => sample_sheet().context("bundled sample sheet is invalid")?,
        };

        let participant = Participant::new(self.name.clone(), self.role);
        let report = run_demo(participant, sheet, config);

        if self.json {
            Ok(serde_json::to_string_pretty(&report)?)
        } else {
            Ok(report.render_text())
        }
    }
}

/// Arguments of `simulate`
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Number of actions to simulate
    #[arg(long, default_value_t = 1000)]
    pub steps: u64,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Stop simulation on first violation
    #[arg(long)]
    pub stop_on_violation: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl SimulateArgs {
    /// Simulator configuration for these arguments
    #[must_use]
    pub fn to_config(&self) -> SimulatorConfig {
        SimulatorConfig {
            seed: self.seed,
            steps: self.steps,
            stop_on_first_violation: self.stop_on_violation,
        }
    }
}
