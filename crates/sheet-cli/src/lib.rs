//! Daily Sheet CLI
//!
//! Library half of the `daily-sheet` binary: argument parsing, subscriber
//! bootstrap, the bundled sample sheet, a scripted demo and the randomized
//! simulator that checks the sheet rules over long action sequences.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod demo;
pub mod fixtures;
pub mod logging;
pub mod simulator;

// Re-exports
pub use cli::{Cli, Command, DemoArgs, SimulateArgs};
pub use demo::{run_demo, DemoReport, DemoStep};
pub use simulator::{run_simulator, SimulatorConfig, SimulatorReport, Violation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
