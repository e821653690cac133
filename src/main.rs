//! EV Dashboard - Indian electric vehicle market explorer
//!
//! Opens the dashboard window by default; the other subcommands print the
//! same data to the terminal or write the charts to disk.

mod cli;
mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};

use ev_dashboard::charts::StaticChartRenderer;
use ev_dashboard::data::{DataLoader, DataProcessor};
use ev_dashboard::logging::{init_logging, LogConfig};
use ev_dashboard::metrics::DEFAULT_TARGET_YEAR;
use ev_dashboard::report::DashboardReport;
use ev_dashboard::Segment;

use crate::cli::{Cli, Command};
use crate::summary::{print_policies, print_series, print_summary};

fn main() {
    let cli = Cli::parse();
    let log_config = LogConfig::from_verbosity(cli.verbose)
        .quiet(cli.quiet)
        .with_format(cli.log_format.into())
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_ansi(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut loader = DataLoader::new(&cli.data);
    let year = cli.year.unwrap_or(DEFAULT_TARGET_YEAR);

    match cli.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(loader, cli.year),
        Command::Summary { json } => {
            let table = loader.table()?;
            let report = DashboardReport::build(&table, year)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print_summary(&report);
            }
            Ok(())
        }
        Command::Charts { out, width, height } => {
            let table = loader.table()?;
            let report = DashboardReport::build(&table, year)?;
            let written = StaticChartRenderer::export_all(&report, &out, (width, height))
                .with_context(|| format!("exporting charts to {}", out.display()))?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Command::Policies => {
            let table = loader.table()?;
            print_policies(&DataProcessor::policy_timeline(&table)?);
            Ok(())
        }
        Command::Series { segments } => {
            let table = loader.table()?;
            let segments = if segments.is_empty() {
                Segment::ALL.to_vec()
            } else {
                segments
            };
            print_series(&DataProcessor::to_long_form(&table, &segments)?);
            Ok(())
        }
    }
}

#[cfg(feature = "gui")]
fn run_gui(loader: DataLoader, year: Option<i32>) -> Result<()> {
    use ev_dashboard::gui::DashboardApp;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Indian EV Market Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "EV Market Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, loader, year)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

#[cfg(not(feature = "gui"))]
fn run_gui(loader: DataLoader, _year: Option<i32>) -> Result<()> {
    anyhow::bail!(
        "built without the `gui` feature; use `summary`, `charts`, `policies` or `series` \
         (data: {})",
        loader.file_path().display()
    )
}
