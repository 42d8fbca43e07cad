use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_accounting::{
    CashCategory, CashFlow, CategoryTotal, CostKind, cash_position, category_breakdown, sum_costs,
    sum_revenue,
};
use siteledger_core::{DateRange, DomainError, DomainResult, ProjectId};
use siteledger_inventory::MaterialMovement;
use siteledger_labor::company_labor_cost;

use crate::project::{ProjectSummary, summarize};
use crate::snapshot::LedgerSnapshot;

/// Company-wide position. `balance` is all-time and ignores the range;
/// every `*_in_range` figure honors it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub range: DateRange,
    pub balance: Decimal,
    pub revenue_in_range: Decimal,
    pub material_cost_in_range: Decimal,
    pub labor_cost_in_range: Decimal,
    pub costs_in_range: Decimal,
    pub cash_inflows_in_range: Decimal,
    pub cash_outflows_in_range: Decimal,
    /// revenue + inflows - costs - outflows, in range.
    pub result_in_range: Decimal,
    pub cash_by_category: Vec<CategoryTotal>,
}

impl CompanySummary {
    pub fn category_total(&self, flow: CashFlow, category: CashCategory) -> Decimal {
        self.cash_by_category
            .iter()
            .find(|c| c.flow == flow && c.category == category)
            .map(|c| c.total)
            .unwrap_or(Decimal::ZERO)
    }
}

struct Figures {
    revenue: Decimal,
    material: Decimal,
    labor: Decimal,
    inflows: Decimal,
    outflows: Decimal,
}

impl Figures {
    fn costs(&self) -> Decimal {
        self.material + self.labor
    }

    fn result(&self) -> Decimal {
        self.revenue + self.inflows - self.costs() - self.outflows
    }
}

/// Every project's figures summed, plus company cash. Rows pointing at a
/// project that no longer exists still count; only the project name is lost.
fn figures(snapshot: &LedgerSnapshot, range: &DateRange) -> Figures {
    let employees = snapshot.employee_book();

    let revenue = sum_revenue(&snapshot.revenues, None, range);
    let direct_material = sum_costs(&snapshot.costs, CostKind::MaterialsOrOther, None, range);
    let direct_labor = sum_costs(&snapshot.costs, CostKind::Labor, None, range);

    let ledger_net: Decimal = snapshot
        .movements
        .iter()
        .filter(|m| m.project_id.is_some() && range.contains(m.occurred_on))
        .map(MaterialMovement::project_cost_delta)
        .sum();
    let credits: Decimal = snapshot
        .leftover_credits
        .iter()
        .filter(|c| range.contains(c.applied_on))
        .map(|c| c.applied_value)
        .sum();

    let labor = company_labor_cost(
        range,
        &snapshot.allocations,
        &snapshot.labor_entries,
        &employees,
    );
    let cash = cash_position(&snapshot.cash_movements, range);

    Figures {
        revenue,
        material: direct_material + ledger_net + credits,
        labor: direct_labor + labor.total,
        inflows: cash.inflows,
        outflows: cash.outflows,
    }
}

pub fn company_summary(snapshot: &LedgerSnapshot, range: &DateRange) -> CompanySummary {
    let lifetime = figures(snapshot, &DateRange::all_time());
    let period = if range.is_all_time() {
        None
    } else {
        Some(figures(snapshot, range))
    };
    let period = period.as_ref().unwrap_or(&lifetime);

    CompanySummary {
        range: *range,
        balance: lifetime.result(),
        revenue_in_range: period.revenue,
        material_cost_in_range: period.material,
        labor_cost_in_range: period.labor,
        costs_in_range: period.costs(),
        cash_inflows_in_range: period.inflows,
        cash_outflows_in_range: period.outflows,
        result_in_range: period.result(),
        cash_by_category: category_breakdown(&snapshot.cash_movements, range),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub range: DateRange,
    pub projects: Vec<ProjectSummary>,
    pub company: CompanySummary,
}

/// Per-project summaries (all projects, or one) alongside the company view.
pub fn portfolio_report(
    snapshot: &LedgerSnapshot,
    range: &DateRange,
    project_filter: Option<ProjectId>,
) -> DomainResult<PortfolioReport> {
    let employees = snapshot.employee_book();
    let ids: Vec<ProjectId> = match project_filter {
        Some(id) => {
            if snapshot.project(id).is_none() {
                return Err(DomainError::not_found("project", id));
            }
            vec![id]
        }
        None => snapshot.projects.iter().map(|p| p.id).collect(),
    };

    let projects = ids
        .into_iter()
        .map(|id| summarize(snapshot, &employees, id, range))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(PortfolioReport {
        range: *range,
        projects,
        company: company_summary(snapshot, range),
    })
}
