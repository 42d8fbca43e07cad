use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_accounting::{CostKind, budget_total, sum_costs, sum_revenue};
use siteledger_core::{DateRange, DomainError, DomainResult, EmployeeId, ProjectId};
use siteledger_inventory::project_material_cost;
use siteledger_labor::{Employee, LaborSource, project_labor_cost};

use crate::snapshot::LedgerSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialCostBreakdown {
    /// `materials_or_other` project costs.
    pub direct_costs: Decimal,
    /// Usage values minus leftover returns from the stock ledger.
    pub ledger_net: Decimal,
    /// Leftover value applied to this project from other projects' surplus.
    pub leftover_credits: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborCostBreakdown {
    pub source: LaborSource,
    /// Allocations or legacy entries, whichever the source resolved to.
    pub tracked: Decimal,
    /// `labor` project costs.
    pub direct_costs: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub project_name: String,
    pub range: DateRange,
    pub revenue: Decimal,
    pub material_cost: MaterialCostBreakdown,
    pub labor_cost: LaborCostBreakdown,
    pub total_cost: Decimal,
    /// revenue - material cost - labor cost.
    pub result: Decimal,
    /// Sum of the project's budget lines (not range-scoped).
    pub budget_total: Decimal,
    /// budget - total cost.
    pub budget_variance: Decimal,
}

pub fn project_summary(
    snapshot: &LedgerSnapshot,
    project_id: ProjectId,
    range: &DateRange,
) -> DomainResult<ProjectSummary> {
    let employees = snapshot.employee_book();
    summarize(snapshot, &employees, project_id, range)
}

pub(crate) fn summarize(
    snapshot: &LedgerSnapshot,
    employees: &HashMap<EmployeeId, Employee>,
    project_id: ProjectId,
    range: &DateRange,
) -> DomainResult<ProjectSummary> {
    let project = snapshot
        .project(project_id)
        .ok_or_else(|| DomainError::not_found("project", project_id))?;

    let revenue = sum_revenue(&snapshot.revenues, Some(project_id), range);

    let direct_material = sum_costs(
        &snapshot.costs,
        CostKind::MaterialsOrOther,
        Some(project_id),
        range,
    );
    let ledger_net = project_material_cost(project_id, range, &snapshot.movements);
    let leftover_credits: Decimal = snapshot
        .leftover_credits
        .iter()
        .filter(|c| c.destination_project_id == project_id && range.contains(c.applied_on))
        .map(|c| c.applied_value)
        .sum();
    let material_cost = MaterialCostBreakdown {
        direct_costs: direct_material,
        ledger_net,
        leftover_credits,
        total: direct_material + ledger_net + leftover_credits,
    };

    let tracked = project_labor_cost(
        project_id,
        range,
        &snapshot.allocations,
        &snapshot.labor_entries,
        employees,
    );
    let direct_labor = sum_costs(&snapshot.costs, CostKind::Labor, Some(project_id), range);
    let labor_cost = LaborCostBreakdown {
        source: tracked.source,
        tracked: tracked.amount,
        direct_costs: direct_labor,
        total: tracked.amount + direct_labor,
    };

    let total_cost = material_cost.total + labor_cost.total;
    let budget_total = budget_total(&snapshot.budgets_of(project_id), &snapshot.budget_items);

    Ok(ProjectSummary {
        project_id,
        project_name: project.name.clone(),
        range: *range,
        revenue,
        material_cost,
        labor_cost,
        total_cost,
        result: revenue - total_cost,
        budget_total,
        budget_variance: budget_total - total_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use siteledger_accounting::{
        Project, ProjectBudget, ProjectBudgetItem, ProjectCost, ProjectRevenue,
    };
    use siteledger_inventory::{
        CreditRequest, LeftoverDraw, LeftoverRequest, Material, MaterialMovement, MovementKind,
        UnitRules, plan_credit, plan_leftover,
    };
    use siteledger_labor::{BillingType, LaborAllocation, LaborEntry};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, d).unwrap()
    }

    #[test]
    fn summary_combines_every_ledger() {
        let project = Project::new("House A", Some("Client A".into())).unwrap();
        let p = project.id;
        let m = Material::new("Block", "un", Some(dec!(10))).unwrap();
        let e = Employee::new("Mason", BillingType::Hourly, dec!(25)).unwrap();
        let budget = ProjectBudget::new(p, "Main").unwrap();

        let mut snapshot = LedgerSnapshot {
            projects: vec![project],
            materials: vec![m.clone()],
            employees: vec![e.clone()],
            ..Default::default()
        };
        snapshot.revenues.push(ProjectRevenue::new(p, "stage", dec!(5000), day(1)).unwrap());
        snapshot.costs.push(
            ProjectCost::new(p, CostKind::MaterialsOrOther, "scaffold", dec!(300), day(2)).unwrap(),
        );
        snapshot
            .costs
            .push(ProjectCost::new(p, CostKind::Labor, "electrician", dec!(400), day(2)).unwrap());
        snapshot.movements.push(
            MaterialMovement::new(
                m.id,
                Some(p),
                MovementKind::Usage,
                dec!(100),
                dec!(1000),
                day(3),
                None,
            )
            .unwrap(),
        );
        snapshot
            .labor_entries
            .push(LaborEntry::new(p, e.id, day(4), dec!(10), None).unwrap());
        snapshot.budgets.push(budget.clone());
        snapshot
            .budget_items
            .push(ProjectBudgetItem::new(budget.id, "all-in", dec!(1), dec!(3000)).unwrap());

        let s = project_summary(&snapshot, p, &DateRange::all_time()).unwrap();
        assert_eq!(s.revenue, dec!(5000));
        assert_eq!(s.material_cost.total, dec!(1300));
        assert_eq!(s.labor_cost.source, LaborSource::LegacyEntries);
        assert_eq!(s.labor_cost.total, dec!(650));
        assert_eq!(s.total_cost, dec!(1950));
        assert_eq!(s.result, dec!(3050));
        assert_eq!(s.budget_total, dec!(3000));
        assert_eq!(s.budget_variance, dec!(1050));

        // Switching to allocations drops the legacy entry.
        snapshot
            .allocations
            .push(LaborAllocation::new(&e, p, day(5), dec!(2), dec!(8), None).unwrap());
        let s = project_summary(&snapshot, p, &DateRange::all_time()).unwrap();
        assert_eq!(s.labor_cost.source, LaborSource::DailyAllocations);
        assert_eq!(s.labor_cost.total, dec!(450));
    }

    #[test]
    fn leftovers_move_cost_between_projects() {
        let origin = Project::new("Origin", None).unwrap();
        let dest = Project::new("Destination", None).unwrap();
        let m = Material::new("Tile", "un", Some(dec!(10))).unwrap();

        let mut snapshot = LedgerSnapshot {
            projects: vec![origin.clone(), dest.clone()],
            materials: vec![m.clone()],
            ..Default::default()
        };
        snapshot.movements.push(
            MaterialMovement::new(
                m.id,
                Some(origin.id),
                MovementKind::Usage,
                dec!(30),
                dec!(300),
                day(1),
                None,
            )
            .unwrap(),
        );
        let plan = plan_leftover(
            &m,
            &LeftoverRequest {
                quantity: dec!(20),
                origin_project_id: Some(origin.id),
                occurred_on: day(2),
                note: None,
            },
            &UnitRules::default(),
            2,
        )
        .unwrap();
        snapshot.movements.extend(plan.movements().cloned());
        let credit = plan_credit(
            &plan.record,
            &[],
            CreditRequest {
                destination_project_id: dest.id,
                draw: LeftoverDraw::Quantity(dec!(5)),
                applied_on: day(3),
                note: None,
            },
            Some((m.unit.as_str(), &UnitRules::default())),
            2,
        )
        .unwrap();
        snapshot.leftovers.push(plan.record);
        snapshot.leftover_credits.push(credit);

        let all = DateRange::all_time();
        let o = project_summary(&snapshot, origin.id, &all).unwrap();
        let d = project_summary(&snapshot, dest.id, &all).unwrap();
        assert_eq!(o.material_cost.ledger_net, dec!(100));
        assert_eq!(d.material_cost.leftover_credits, dec!(50));
        assert_eq!(d.material_cost.total, dec!(50));

        let before_credit = DateRange::until(day(2));
        let d = project_summary(&snapshot, dest.id, &before_credit).unwrap();
        assert_eq!(d.material_cost.total, dec!(0));
    }

    #[test]
    fn unknown_project_is_not_found() {
        let snapshot = LedgerSnapshot::default();
        let err = project_summary(&snapshot, ProjectId::new(), &DateRange::all_time()).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "project", .. }));
    }
}
