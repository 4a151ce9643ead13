//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Config file used when `--config` is not given. A missing file at this
/// path falls back to built-in defaults.
pub const DEFAULT_CONFIG_PATH: &str = "logwarden.toml";

/// Logwarden -- offline web access and SSH auth log threat analyzer.
///
/// Use `logwarden <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "logwarden", version, about, long_about = None)]
pub struct Cli {
    /// Path to the logwarden.toml configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze web access and/or SSH auth logs for threats.
    Analyze(AnalyzeArgs),

    /// Show the effective detection rules and their thresholds.
    Rules,

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- analyze ----

/// Run the detection rules over one or both log sources.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Web server access log (Common/Combined Log Format).
    #[arg(long, value_name = "PATH")]
    pub web: Option<PathBuf>,

    /// sshd auth log (syslog format).
    #[arg(long, value_name = "PATH")]
    pub auth: Option<PathBuf>,

    /// Year to assume for auth log timestamps (default: config, then current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Known-bad IP list, one entry per line (default: [input].blacklist_path).
    #[arg(long, value_name = "PATH")]
    pub blacklist: Option<PathBuf>,

    /// Export alerts as CSV into DIR (default: [report].reports_dir).
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Exit with code 4 when any alert is raised.
    #[arg(long)]
    pub fail_on_alert: bool,
}

// ---- config ----

/// Manage logwarden configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, detection, input, report).
        #[arg(long)]
        section: Option<String>,
    },
}
