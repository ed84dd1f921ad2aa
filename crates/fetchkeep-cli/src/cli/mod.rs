//! CLI for the fetchkeep installer.
//!
//! Takes no arguments: what to clone and what to keep are fixed in the
//! installer's configuration.

use anyhow::Result;
use clap::Parser;
use fetchkeep_core::config;
use fetchkeep_core::pipeline::{InstallReport, Installer};

#[derive(Debug, Parser)]
#[command(name = "fetchkeep", version)]
#[command(
    about = "Clone the Form repository, keep Form.py, and remove this installer",
    long_about = None
)]
pub struct Cli {}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let _cli = Cli::parse();

        let cfg = config::load()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let report = Installer::from_config(cfg)?.run()?;
        print_summary(&report);
        Ok(())
    }
}

fn print_summary(report: &InstallReport) {
    match &report.prune.kept {
        Some(path) => println!("Installed {}", path.display()),
        None => println!(
            "Cloned into {}, but the expected file was not found",
            report.checkout.display()
        ),
    }
}
