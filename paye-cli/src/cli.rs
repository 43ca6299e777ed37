use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use paye_core::{Category, PayPeriod, PresetLevel};

/// PAYE calculator for the Nigeria Tax Act 2025 bands.
///
/// Computes tax, take-home pay and the per-band breakdown for a monthly or
/// yearly gross income.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about, long_about = None)]
pub struct Cli {
    /// TOML config file. Defaults to `paye.toml` in the working directory
    /// when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `paye_core=trace`. Overrides the config
    /// file; `RUST_LOG` applies when neither is set.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log records to this file as well as stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute PAYE for one amount.
    Calc(CalcArgs),
    /// List the preset amounts of a category.
    Presets(PresetsArgs),
    /// Show the band table in use.
    Bands(BandsArgs),
    /// Compute PAYE for every row of a CSV file.
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Gross amount, e.g. `250000`, `250,000`, `₦250k` or `1.5m`.
    /// Defaults to the category's preset.
    #[arg(conflicts_with = "preset", allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// Period the amount is expressed in.
    #[arg(short, long)]
    pub period: Option<PayPeriod>,

    /// Earner category used to pick a preset amount.
    #[arg(short, long)]
    pub category: Option<Category>,

    /// Preset level: min-wage, entry, mid, senior or executive.
    #[arg(long)]
    pub preset: Option<PresetLevel>,

    /// CSV band schedule replacing the built-in bands.
    #[arg(long)]
    pub schedule: Option<PathBuf>,

    /// Print the computation as JSON.
    #[arg(long, conflicts_with = "summary")]
    pub json: bool,

    /// Print the three-line summary instead of the full report.
    #[arg(long)]
    pub summary: bool,
}

#[derive(Debug, Clone, Args)]
pub struct PresetsArgs {
    #[arg(short, long)]
    pub category: Option<Category>,

    #[arg(short, long)]
    pub period: Option<PayPeriod>,
}

#[derive(Debug, Clone, Args)]
pub struct BandsArgs {
    #[arg(short, long)]
    pub period: Option<PayPeriod>,

    /// CSV band schedule replacing the built-in bands.
    #[arg(long)]
    pub schedule: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV with `amount,period` columns.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write results. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// CSV band schedule replacing the built-in bands.
    #[arg(long)]
    pub schedule: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calc_parses_typed_selectors() {
        let cli = Cli::try_parse_from([
            "paye", "calc", "250k", "--period", "yearly", "--category", "tech",
        ])
        .unwrap();

        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.amount.as_deref(), Some("250k"));
        assert_eq!(args.period, Some(PayPeriod::Yearly));
        assert_eq!(args.category, Some(Category::Tech));
    }

    #[test]
    fn calc_rejects_amount_with_preset() {
        let result = Cli::try_parse_from(["paye", "calc", "1000", "--preset", "mid"]);

        assert!(result.is_err());
    }

    #[test]
    fn calc_rejects_unknown_period() {
        let result = Cli::try_parse_from(["paye", "calc", "--period", "weekly"]);

        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["paye", "bands", "--log-level", "debug"]).unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
