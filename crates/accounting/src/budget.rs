use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{
    BudgetId, BudgetItemId, DomainError, DomainResult, Entity, ProjectId, ensure_non_negative,
    ensure_positive,
};

/// A named budget for a project. Its total is derived from its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBudget {
    pub id: BudgetId,
    pub project_id: ProjectId,
    pub name: String,
}

impl Entity for ProjectBudget {
    type Id = BudgetId;
    const NAME: &'static str = "project budget";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ProjectBudget {
    pub fn new(project_id: ProjectId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("budget name cannot be empty"));
        }
        Ok(Self {
            id: BudgetId::new(),
            project_id,
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectBudgetItem {
    pub id: BudgetItemId,
    pub budget_id: BudgetId,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl Entity for ProjectBudgetItem {
    type Id = BudgetItemId;
    const NAME: &'static str = "budget item";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl ProjectBudgetItem {
    pub fn new(
        budget_id: BudgetId,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> DomainResult<Self> {
        ensure_positive(quantity, "quantity")?;
        ensure_non_negative(unit_price, "unit_price")?;
        Ok(Self {
            id: BudgetItemId::new(),
            budget_id,
            description: description.into(),
            quantity,
            unit_price,
        })
    }

    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Sum of item totals for the given budgets.
pub fn budget_total(budgets: &[ProjectBudget], items: &[ProjectBudgetItem]) -> Decimal {
    items
        .iter()
        .filter(|i| budgets.iter().any(|b| b.id == i.budget_id))
        .map(ProjectBudgetItem::line_total)
        .sum()
}
