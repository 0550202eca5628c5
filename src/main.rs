//! SisJornada CLI - render a prevention duty report from an assignment file.
//!
//! Usage: `sisjornada <assignment.json> [output.pdf]`
//!
//! The assignment file describes the duty: commander, event data and the
//! selected personnel, matched against the roster CSV by search label,
//! identifier or name. The roster and logo locations come from the config
//! file (see `config`).

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sisjornada::config::Config;
use sisjornada::models::catalog;
use sisjornada::models::{
    AssignedPerson, CommanderInfo, EventMetadata, DEFAULT_COMMANDER_RANK, DEFAULT_UNIT,
};
use sisjornada::{DutyReport, Roster};

/// Assignment file layout. Personnel entries may override the default rank
/// and unit per person; the commander falls back to the usual pre-selected
/// rank and unit when unset.
#[derive(Debug, Deserialize)]
struct AssignmentFile {
    commander: Option<CommanderSpec>,
    event: EventSpec,
    #[serde(default)]
    personnel: Vec<PersonSpec>,
}

#[derive(Debug, Deserialize)]
struct CommanderSpec {
    name: String,
    rank: Option<String>,
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonSpec {
    name: String,
    rank: Option<String>,
    unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventSpec {
    order_number: String,
    bulletin_number: String,
    /// YYYY-MM-DD
    date: NaiveDate,
    location: String,
    /// HH:MM
    start_time: String,
    /// HH:MM
    end_time: String,
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" {
        eprintln!("Usage: sisjornada <assignment.json> [output.pdf]");
        std::process::exit(2);
    }

    let config = Config::load()?;
    let roster = Roster::load(&config.roster_path);
    if roster.is_empty() {
        eprintln!(
            "Aguardando dados: tabela de efetivo '{}' ausente ou vazia.",
            config.roster_path.display()
        );
        return Ok(());
    }
    info!(count = roster.len(), "Roster ready");

    let contents = std::fs::read_to_string(&args[1])
        .with_context(|| format!("Failed to read assignment file: {}", args[1]))?;
    let assignment: AssignmentFile =
        serde_json::from_str(&contents).context("Invalid assignment file")?;

    let commander = assignment
        .commander
        .map(|spec| resolve_commander(&roster, spec))
        .transpose()?;
    let personnel = assignment
        .personnel
        .into_iter()
        .map(|spec| resolve_person(&roster, spec))
        .collect::<Result<Vec<_>>>()?;
    let event = build_event(assignment.event)?;

    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.output_path.clone());

    let report = DutyReport::new(commander.as_ref(), &event, &personnel)
        .with_logo_path(&config.logo_path);
    report
        .render_to_file(&output)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    info!(path = %output.display(), personnel = personnel.len(), "Report written");
    println!("Relatório gerado: {}", output.display());
    Ok(())
}

fn resolve_commander(roster: &Roster, spec: CommanderSpec) -> Result<CommanderInfo> {
    let record = roster
        .find(&spec.name)
        .with_context(|| format!("No roster match for commander '{}'", spec.name))?;
    let rank = spec.rank.unwrap_or_else(|| DEFAULT_COMMANDER_RANK.to_string());
    validate_rank(&rank)?;
    let unit = spec.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string());
    validate_unit(&unit)?;
    Ok(CommanderInfo {
        name: record.full_name.clone(),
        rank,
        unit,
    })
}

fn resolve_person(roster: &Roster, spec: PersonSpec) -> Result<AssignedPerson> {
    let record = roster
        .find(&spec.name)
        .with_context(|| format!("No roster match for '{}'", spec.name))?
        .clone();
    let mut assigned = AssignedPerson::from_record(record);
    if let Some(rank) = spec.rank {
        validate_rank(&rank)?;
        assigned = assigned.with_rank(rank);
    }
    if let Some(unit) = spec.unit {
        validate_unit(&unit)?;
        assigned = assigned.with_unit(unit);
    }
    Ok(assigned)
}

/// Selection fields only accept codes from the closed vocabularies.
fn validate_rank(rank: &str) -> Result<()> {
    anyhow::ensure!(catalog::is_rank(rank), "Unknown rank code: '{}'", rank);
    Ok(())
}

fn validate_unit(unit: &str) -> Result<()> {
    anyhow::ensure!(catalog::is_unit(unit), "Unknown unit code: '{}'", unit);
    Ok(())
}

fn build_event(spec: EventSpec) -> Result<EventMetadata> {
    Ok(EventMetadata {
        order_number: spec.order_number,
        bulletin_number: spec.bulletin_number,
        date: spec.date,
        location: spec.location,
        start_time: parse_time(&spec.start_time)?,
        end_time: parse_time(&spec.end_time)?,
    })
}

/// Accepts "HH:MM" or "HH:MM:SS".
fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .with_context(|| format!("Invalid time: '{}'", value))
}

// ============================================================================
// Tests
// ============================================================================
