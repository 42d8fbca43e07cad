use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{
    CostId, DateRange, DomainResult, Entity, ProjectId, RevenueId, ensure_positive,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRevenue {
    pub id: RevenueId,
    pub project_id: ProjectId,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Entity for ProjectRevenue {
    type Id = RevenueId;
    const NAME: &'static str = "project revenue";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ProjectRevenue {
    pub fn new(
        project_id: ProjectId,
        description: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> DomainResult<Self> {
        ensure_positive(amount, "amount")?;
        Ok(Self {
            id: RevenueId::new(),
            project_id,
            description: description.into(),
            amount,
            date,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostKind {
    Labor,
    MaterialsOrOther,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCost {
    pub id: CostId,
    pub project_id: ProjectId,
    pub kind: CostKind,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Entity for ProjectCost {
    type Id = CostId;
    const NAME: &'static str = "project cost";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ProjectCost {
    pub fn new(
        project_id: ProjectId,
        kind: CostKind,
        description: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
    ) -> DomainResult<Self> {
        ensure_positive(amount, "amount")?;
        Ok(Self {
            id: CostId::new(),
            project_id,
            kind,
            description: description.into(),
            amount,
            date,
        })
    }
}

/// Revenue of `project` (or of every project when `None`) within `range`.
pub fn sum_revenue(
    revenues: &[ProjectRevenue],
    project: Option<ProjectId>,
    range: &DateRange,
) -> Decimal {
    revenues
        .iter()
        .filter(|r| project.is_none_or(|p| r.project_id == p) && range.contains(r.date))
        .map(|r| r.amount)
        .sum()
}

/// Costs of one kind for `project` (or every project when `None`) within `range`.
pub fn sum_costs(
    costs: &[ProjectCost],
    kind: CostKind,
    project: Option<ProjectId>,
    range: &DateRange,
) -> Decimal {
    costs
        .iter()
        .filter(|c| {
            c.kind == kind && project.is_none_or(|p| c.project_id == p) && range.contains(c.date)
        })
        .map(|c| c.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    #[test]
    fn sums_filter_by_project_kind_and_range() {
        let p = ProjectId::new();
        let q = ProjectId::new();
        let revenues = vec![
            ProjectRevenue::new(p, "stage 1", dec!(1000), day(1)).unwrap(),
            ProjectRevenue::new(p, "stage 2", dec!(500), day(20)).unwrap(),
            ProjectRevenue::new(q, "deposit", dec!(300), day(1)).unwrap(),
        ];
        let costs = vec![
            ProjectCost::new(p, CostKind::Labor, "crew", dec!(100), day(2)).unwrap(),
            ProjectCost::new(p, CostKind::MaterialsOrOther, "rental", dec!(40), day(2)).unwrap(),
            ProjectCost::new(q, CostKind::Labor, "crew", dec!(70), day(2)).unwrap(),
        ];
        let first_half = DateRange::between(day(1), day(15)).unwrap();

        assert_eq!(sum_revenue(&revenues, Some(p), &first_half), dec!(1000));
        assert_eq!(sum_revenue(&revenues, None, &DateRange::all_time()), dec!(1800));
        assert_eq!(sum_costs(&costs, CostKind::Labor, Some(p), &first_half), dec!(100));
        assert_eq!(sum_costs(&costs, CostKind::Labor, None, &first_half), dec!(170));
        assert_eq!(
            sum_costs(&costs, CostKind::MaterialsOrOther, Some(q), &first_half),
            dec!(0)
        );
    }

    #[test]
    fn amounts_must_be_positive() {
        assert!(ProjectRevenue::new(ProjectId::new(), "x", dec!(0), day(1)).is_err());
        assert!(
            ProjectCost::new(ProjectId::new(), CostKind::Labor, "x", dec!(-5), day(1)).is_err()
        );
    }
}
