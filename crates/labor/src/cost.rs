//! Labor cost per project, reconciling daily allocations and legacy entries.
//!
//! The source is resolved once per (project, range): any allocation in range
//! switches the whole project to allocations and drops its legacy entries.
//! There is no per-day merge.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{DateRange, EmployeeId, ProjectId};

use crate::allocation::LaborAllocation;
use crate::employee::Employee;
use crate::entry::LaborEntry;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborSource {
    /// No allocations in range: legacy entries at current rates.
    LegacyEntries,
    /// At least one allocation in range: allocations at snapshot rates only.
    DailyAllocations,
}

impl LaborSource {
    pub fn resolve(allocations_in_range: usize) -> Self {
        if allocations_in_range > 0 {
            LaborSource::DailyAllocations
        } else {
            LaborSource::LegacyEntries
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLaborCost {
    pub project_id: ProjectId,
    pub source: LaborSource,
    pub amount: Decimal,
    /// Rows that contributed to `amount`.
    pub counted_rows: usize,
    /// Legacy rows dropped because allocations took over.
    pub excluded_legacy_rows: usize,
    /// Legacy rows whose employee no longer exists (contributed zero).
    pub missing_employee_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyLaborCost {
    pub total: Decimal,
    pub projects: Vec<ProjectLaborCost>,
}

pub fn project_labor_cost(
    project_id: ProjectId,
    range: &DateRange,
    allocations: &[LaborAllocation],
    entries: &[LaborEntry],
    employees: &HashMap<EmployeeId, Employee>,
) -> ProjectLaborCost {
    let allocs: Vec<&LaborAllocation> = allocations
        .iter()
        .filter(|a| a.project_id == project_id && range.contains(a.date))
        .collect();
    let legacy: Vec<&LaborEntry> = entries
        .iter()
        .filter(|e| e.project_id == project_id && range.contains(e.date))
        .collect();

    match LaborSource::resolve(allocs.len()) {
        LaborSource::DailyAllocations => ProjectLaborCost {
            project_id,
            source: LaborSource::DailyAllocations,
            amount: allocs.iter().map(|a| a.cost()).sum(),
            counted_rows: allocs.len(),
            excluded_legacy_rows: legacy.len(),
            missing_employee_rows: 0,
        },
        LaborSource::LegacyEntries => {
            let mut amount = Decimal::ZERO;
            let mut missing = 0;
            for entry in &legacy {
                let employee = employees.get(&entry.employee_id);
                if employee.is_none() {
                    missing += 1;
                }
                amount += entry.cost(employee);
            }
            ProjectLaborCost {
                project_id,
                source: LaborSource::LegacyEntries,
                amount,
                counted_rows: legacy.len() - missing,
                excluded_legacy_rows: 0,
                missing_employee_rows: missing,
            }
        }
    }
}

/// Company labor cost: the source switch is evaluated per project, then summed.
pub fn company_labor_cost(
    range: &DateRange,
    allocations: &[LaborAllocation],
    entries: &[LaborEntry],
    employees: &HashMap<EmployeeId, Employee>,
) -> CompanyLaborCost {
    let mut project_ids: Vec<ProjectId> = allocations
        .iter()
        .filter(|a| range.contains(a.date))
        .map(|a| a.project_id)
        .chain(
            entries
                .iter()
                .filter(|e| range.contains(e.date))
                .map(|e| e.project_id),
        )
        .collect();
    project_ids.sort();
    project_ids.dedup();

    let projects: Vec<ProjectLaborCost> = project_ids
        .into_iter()
        .map(|p| project_labor_cost(p, range, allocations, entries, employees))
        .collect();

    CompanyLaborCost {
        total: projects.iter().map(|p| p.amount).sum(),
        projects,
    }
}

/// Labor cost per source across projects; handy for migration progress views.
pub fn totals_by_source(cost: &CompanyLaborCost) -> BTreeMap<&'static str, Decimal> {
    let mut out = BTreeMap::new();
    for p in &cost.projects {
        let key = match p.source {
            LaborSource::LegacyEntries => "legacy_entries",
            LaborSource::DailyAllocations => "daily_allocations",
        };
        *out.entry(key).or_insert(Decimal::ZERO) += p.amount;
    }
    out
}
