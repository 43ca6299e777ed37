//! Command handlers for the `paye` binary.
//!
//! Each handler writes its output to the given writer so the binary can pass
//! stdout and tests can pass a buffer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use paye_core::{Category, PayPeriod, TaxComputation};
use paye_data::{ScheduleLoader, ScheduleSet, compute_batch, read_batch, write_batch};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::cli::{BandsArgs, BatchArgs, CalcArgs, Cli, Command, PresetsArgs};
use crate::config::AppConfig;
use crate::format::{
    format_naira, format_naira_compact, render_bands, render_presets, render_report, summary_text,
};
use crate::session::{CalculatorSession, amount_step, max_amount};
use crate::utils::parse_amount;

/// JSON shape printed by `calc --json`.
#[derive(Debug, Serialize)]
struct CalcReport<'a> {
    period: PayPeriod,
    category: Category,
    #[serde(flatten)]
    computation: &'a TaxComputation,
}

/// Reads a band schedule file, or returns an empty set when `path` is `None`.
pub fn load_schedules(path: Option<&Path>) -> Result<ScheduleSet> {
    let Some(path) = path else {
        return Ok(ScheduleSet::default());
    };

    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let schedules = ScheduleLoader::load(file)
        .with_context(|| format!("Failed to load band schedule: {}", path.display()))?;

    info!(path = %path.display(), "using custom band schedule");
    Ok(schedules)
}

/// Dispatches a parsed command line.
pub fn run<W: Write>(
    cli: &Cli,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    match &cli.command {
        Command::Calc(args) => run_calc(args, config, out),
        Command::Presets(args) => run_presets(args, config, out),
        Command::Bands(args) => run_bands(args, config, out),
        Command::Batch(args) => run_batch(args, config, out),
    }
}

pub fn run_calc<W: Write>(
    args: &CalcArgs,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let period = args.period.or(config.period).unwrap_or_default();
    let category = args.category.or(config.category).unwrap_or_default();
    let schedules = load_schedules(args.schedule.as_deref().or(config.schedule.as_deref()))?;

    let mut session = CalculatorSession::new(period, category);
    if let Some(level) = args.preset {
        session.select_preset(level);
    }
    if let Some(input) = &args.amount {
        let amount = parse_amount(input).context("Failed to read amount")?;
        session.set_amount(amount);
    }

    let computation = match schedules.get(period) {
        Some(schedule) => session.compute_with(schedule),
        None => session.compute(),
    };
    info!(
        amount = %session.amount(),
        period = %period,
        total_tax = %computation.total_tax,
        "calculated"
    );

    if args.json {
        let report = CalcReport {
            period,
            category,
            computation: &computation,
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("Failed to write JSON")?;
        writeln!(out)?;
    } else if args.summary {
        writeln!(out, "{}", summary_text(&computation, period))?;
    } else {
        let preset = session
            .active_preset()
            .map(|level| format!(" [{}]", level.label()))
            .unwrap_or_default();
        writeln!(
            out,
            "Income          {} {}{}",
            format_naira(session.amount()),
            period,
            preset
        )?;
        writeln!(out, "{}", render_report(&computation, period, category))?;
    }

    Ok(())
}

pub fn run_presets<W: Write>(
    args: &PresetsArgs,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let period = args.period.or(config.period).unwrap_or_default();
    let category = args.category.or(config.category).unwrap_or_default();

    write!(out, "{}", render_presets(category, period))?;
    writeln!(
        out,
        "Range: {} to {}, step {}",
        format_naira_compact(Decimal::ZERO),
        format_naira_compact(max_amount(period)),
        format_naira_compact(amount_step(period)),
    )?;
    Ok(())
}

pub fn run_bands<W: Write>(
    args: &BandsArgs,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let period = args.period.or(config.period).unwrap_or_default();
    let schedules = load_schedules(args.schedule.as_deref().or(config.schedule.as_deref()))?;

    write!(out, "{}", render_bands(&schedules.schedule_for(period), period))?;
    Ok(())
}

pub fn run_batch<W: Write>(
    args: &BatchArgs,
    config: &AppConfig,
    out: &mut W,
) -> Result<()> {
    let schedules = load_schedules(args.schedule.as_deref().or(config.schedule.as_deref()))?;

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open: {}", args.input.display()))?;
    let records = read_batch(input)
        .with_context(|| format!("Failed to parse CSV: {}", args.input.display()))?;
    let rows = compute_batch(&records, &schedules);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?;
            write_batch(file, &rows)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!(rows = rows.len(), path = %path.display(), "wrote batch results");
        }
        None => write_batch(out, &rows).context("Failed to write batch results")?,
    }

    Ok(())
}
