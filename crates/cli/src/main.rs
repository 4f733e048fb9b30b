//! `spacewx` — classify space-weather snapshots from the command line.
//!
//! Usage:
//!   spacewx classify [--policy FILE] [--xray-rules] [--fail-on-alert] [FILE|-]
//!   spacewx policy   [--policy FILE] [--xray-rules]
//!   spacewx watch    --snapshot FILE [--history FILE] [--interval-secs N]
//!
//! Example:
//!   echo '{"kp_index": 6, "flare_probability": 0.5}' | spacewx classify

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use spacewx_observability::LogFormat;

mod commands;
mod report;

#[derive(Parser)]
#[command(name = "spacewx")]
#[command(version, about = "Space weather risk classification and alerting")]
struct Cli {
    /// Log output format: json or pretty
    #[arg(long, global = true, default_value = "pretty", env = "SPACEWX_LOG_FORMAT")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

/// Threshold policy selection shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct PolicyArgs {
    /// JSON threshold policy file (defaults to the built-in table)
    #[arg(long, env = "SPACEWX_POLICY")]
    pub policy: Option<PathBuf>,

    /// Also alert on X-ray flux (M class → MODERATE, X class → HIGH)
    #[arg(long)]
    pub xray_rules: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one snapshot and print the alert outcome as JSON
    Classify {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Snapshot JSON file, or '-' for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Exit with status 2 when the outcome is above NORMAL
        #[arg(long)]
        fail_on_alert: bool,
    },

    /// Validate and print the effective threshold policy
    Policy {
        #[command(flatten)]
        policy: PolicyArgs,
    },

    /// Poll a snapshot file and log every outcome (Enter polls now, EOF stops)
    Watch {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Snapshot JSON file rewritten by the data collector
        #[arg(long)]
        snapshot: PathBuf,

        /// Append outcomes to this JSON-lines history file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Seconds between polls
        #[arg(long, default_value_t = 900, env = "SPACEWX_INTERVAL_SECS")]
        interval_secs: u64,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    spacewx_observability::init_with(cli.log_format);

    match cli.command {
        Command::Classify {
            policy,
            input,
            fail_on_alert,
        } => commands::classify(&policy, &input, fail_on_alert),
        Command::Policy { policy } => commands::print_policy(&policy),
        Command::Watch {
            policy,
            snapshot,
            history,
            interval_secs,
        } => commands::watch(&policy, snapshot, history, interval_secs),
    }
}
