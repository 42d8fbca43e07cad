//! Company cash ledger: project-independent inflows and outflows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{
    CashMovementId, DateRange, DomainResult, Entity, ValueObject, ensure_positive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CashFlow {
    Inflow,
    Outflow,
}

impl CashFlow {
    fn sign(self) -> Decimal {
        match self {
            CashFlow::Inflow => Decimal::ONE,
            CashFlow::Outflow => Decimal::NEGATIVE_ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashCategory {
    CapitalContribution,
    CompanyExpense,
    OwnerCompensation,
    OwnerWithdrawal,
    Other,
}

/// Append-only company cash record. `amount` is always positive; `flow`
/// carries the direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyCashMovement {
    pub id: CashMovementId,
    pub flow: CashFlow,
    pub category: CashCategory,
    pub description: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Entity for CompanyCashMovement {
    type Id = CashMovementId;
    const NAME: &'static str = "cash movement";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CompanyCashMovement {
    pub fn new(
        flow: CashFlow,
        category: CashCategory,
        amount: Decimal,
        date: NaiveDate,
        description: Option<String>,
    ) -> DomainResult<Self> {
        ensure_positive(amount, "amount")?;
        Ok(Self {
            id: CashMovementId::new(),
            flow,
            category,
            description,
            amount,
            date,
        })
    }

    pub fn signed_amount(&self) -> Decimal {
        self.flow.sign() * self.amount
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CashPosition {
    pub inflows: Decimal,
    pub outflows: Decimal,
    /// inflows - outflows.
    pub balance: Decimal,
}

impl ValueObject for CashPosition {}

/// Cash position over `range` (`DateRange::all_time()` for the running balance).
pub fn cash_position(movements: &[CompanyCashMovement], range: &DateRange) -> CashPosition {
    let mut position = CashPosition::default();
    for m in movements.iter().filter(|m| range.contains(m.date)) {
        match m.flow {
            CashFlow::Inflow => position.inflows += m.amount,
            CashFlow::Outflow => position.outflows += m.amount,
        }
        position.balance += m.signed_amount();
    }
    position
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub flow: CashFlow,
    pub category: CashCategory,
    pub total: Decimal,
    pub count: usize,
}

/// Totals per (flow, category), sorted by flow then category.
pub fn category_breakdown(
    movements: &[CompanyCashMovement],
    range: &DateRange,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for m in movements.iter().filter(|m| range.contains(m.date)) {
        match totals
            .iter_mut()
            .find(|t| t.flow == m.flow && t.category == m.category)
        {
            Some(t) => {
                t.total += m.amount;
                t.count += 1;
            }
            None => totals.push(CategoryTotal {
                flow: m.flow,
                category: m.category,
                total: m.amount,
                count: 1,
            }),
        }
    }
    totals.sort_by_key(|t| (t.flow, t.category));
    totals
}
