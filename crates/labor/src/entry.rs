use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{DomainResult, EmployeeId, Entity, LaborEntryId, ProjectId, ensure_positive};

use crate::employee::Employee;

/// Legacy labor record: a quantity of hours or days (per the employee's
/// billing type), priced at read time with the employee's current rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborEntry {
    pub id: LaborEntryId,
    pub project_id: ProjectId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub note: Option<String>,
}

impl Entity for LaborEntry {
    type Id = LaborEntryId;
    const NAME: &'static str = "labor entry";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl LaborEntry {
    pub fn new(
        project_id: ProjectId,
        employee_id: EmployeeId,
        date: NaiveDate,
        quantity: Decimal,
        note: Option<String>,
    ) -> DomainResult<Self> {
        ensure_positive(quantity, "quantity")?;
        Ok(Self {
            id: LaborEntryId::new(),
            project_id,
            employee_id,
            date,
            quantity,
            note,
        })
    }

    /// Cost at the employee's current rate; a missing employee costs nothing.
    pub fn cost(&self, employee: Option<&Employee>) -> Decimal {
        employee
            .filter(|e| e.id == self.employee_id)
            .map(|e| self.quantity * e.current_rate)
            .unwrap_or(Decimal::ZERO)
    }
}
