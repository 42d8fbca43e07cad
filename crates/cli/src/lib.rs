//! `siteledger-report`: rollups over a JSON ledger snapshot.
//!
//! Reads a `LedgerSnapshot` document and prints the requested report as JSON
//! on stdout. Logs go to stderr.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing::info;

use siteledger_core::{DateRange, DomainError, MaterialId, ProjectId};
use siteledger_inventory::stock_position;
use siteledger_labor::{company_labor_cost, totals_by_source};
use siteledger_reporting::{LedgerSnapshot, company_summary, portfolio_report, project_summary};

/// Construction ledger reports.
#[derive(Parser, Debug)]
#[command(name = "siteledger-report", author, version, about, long_about = None)]
pub struct Args {
    /// JSON ledger snapshot to read.
    #[arg(long, env = "SITELEDGER_SNAPSHOT")]
    pub snapshot: PathBuf,

    /// First day of the range (inclusive).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the range (inclusive).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Single-line JSON output.
    #[arg(long)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Profit and loss of one project.
    Project { id: ProjectId },
    /// Company balance and period figures.
    Company,
    /// Every project (or one) plus the company view.
    Portfolio {
        #[arg(long)]
        project: Option<ProjectId>,
    },
    /// Stock position of one material. Ignores the range.
    Stock { material: MaterialId },
    /// Labor cost per project and per recording source.
    Labor,
}

pub fn run(args: Args) -> Result<Value> {
    let raw = fs::read_to_string(&args.snapshot)
        .with_context(|| format!("reading snapshot {}", args.snapshot.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot {}", args.snapshot.display()))?;
    let range = DateRange::new(args.from, args.to)?;
    info!(
        projects = snapshot.projects.len(),
        movements = snapshot.movements.len(),
        range = %range,
        "snapshot loaded"
    );
    report(&snapshot, &range, &args.command)
}

/// Compute one report as JSON.
pub fn report(snapshot: &LedgerSnapshot, range: &DateRange, command: &Command) -> Result<Value> {
    let value = match command {
        Command::Project { id } => serde_json::to_value(project_summary(snapshot, *id, range)?)?,
        Command::Company => serde_json::to_value(company_summary(snapshot, range))?,
        Command::Portfolio { project } => {
            serde_json::to_value(portfolio_report(snapshot, range, *project)?)?
        }
        Command::Stock { material } => {
            let material = snapshot
                .materials
                .iter()
                .find(|m| m.id == *material)
                .ok_or_else(|| DomainError::not_found("material", material))?;
            serde_json::to_value(stock_position(material, &snapshot.movements))?
        }
        Command::Labor => {
            let cost = company_labor_cost(
                range,
                &snapshot.allocations,
                &snapshot.labor_entries,
                &snapshot.employee_book(),
            );
            json!({
                "total": cost.total,
                "by_source": totals_by_source(&cost),
                "projects": cost.projects,
            })
        }
    };
    Ok(value)
}
