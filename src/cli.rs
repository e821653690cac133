//! CLI argument definitions for the EV dashboard.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use ev_dashboard::charts::DEFAULT_CHART_SIZE;
use ev_dashboard::data::DEFAULT_DATA_PATH;
use ev_dashboard::logging::LogFormat;
use ev_dashboard::Segment;

#[derive(Parser, Debug)]
#[command(
    name = "ev-dashboard",
    version,
    about = "Indian Electric Vehicle Market Dashboard",
    long_about = "Explore yearly EV sales, market penetration and government policy\n\
                  events for India. Opens the dashboard window by default."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the market CSV.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_PATH, global = true)]
    pub data: PathBuf,

    /// Year for the headline metrics (default: 2024).
    #[arg(long, value_name = "YEAR", global = true)]
    pub year: Option<i32>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Prefix log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the module path in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the dashboard window.
    Gui,

    /// Print the headline metrics and policy timeline.
    Summary {
        /// Emit the full report as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Render the three dashboard charts as SVG files.
    Charts {
        /// Output directory.
        #[arg(long, value_name = "DIR", default_value = "charts")]
        out: PathBuf,

        #[arg(long, default_value_t = DEFAULT_CHART_SIZE.0)]
        width: u32,

        #[arg(long, default_value_t = DEFAULT_CHART_SIZE.1)]
        height: u32,
    },

    /// List government policy events by year.
    Policies,

    /// Print the long-form (year, series, value) table.
    Series {
        /// Segment to include (2W, 3W, 4W, Bus); repeatable. Defaults to all.
        #[arg(long = "segment", value_name = "SEGMENT")]
        segments: Vec<Segment>,
    },
}

/// CLI log format choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
