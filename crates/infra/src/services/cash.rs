use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use siteledger_accounting::{
    CashCategory, CashFlow, CashPosition, CategoryTotal, CompanyCashMovement, cash_position,
    category_breakdown,
};
use siteledger_core::DateRange;

use crate::error::ServiceResult;
use crate::store::LedgerStore;

/// Company-level cash ledger, separate from project accounting.
#[derive(Debug, Clone)]
pub struct CashService {
    store: LedgerStore,
}

impl CashService {
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    #[instrument(skip(self, description))]
    pub fn record_movement(
        &self,
        flow: CashFlow,
        category: CashCategory,
        amount: Decimal,
        date: NaiveDate,
        description: Option<String>,
    ) -> ServiceResult<CompanyCashMovement> {
        let movement = CompanyCashMovement::new(flow, category, amount, date, description)?;
        self.store.cash_movements.insert(movement.clone())?;
        info!(movement = %movement.id, "cash movement recorded");
        Ok(movement)
    }

    /// Inflows minus outflows; all time when `range` is `None`.
    pub fn cash_balance(&self, range: Option<DateRange>) -> ServiceResult<CashPosition> {
        let movements = self.store.cash_movements.list()?;
        Ok(cash_position(&movements, &range.unwrap_or_default()))
    }

    pub fn category_breakdown(
        &self,
        range: Option<DateRange>,
    ) -> ServiceResult<Vec<CategoryTotal>> {
        let movements = self.store.cash_movements.list()?;
        Ok(category_breakdown(&movements, &range.unwrap_or_default()))
    }
}
