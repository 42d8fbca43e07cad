use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{
    AllocationId, DomainError, DomainResult, EmployeeId, Entity, ProjectId, ensure_positive,
};

use crate::employee::Employee;

const MAX_HOURS_PER_DAY: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Hours an employee spent on one project on one day, priced at the rate in
/// force when the allocation was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborAllocation {
    pub id: AllocationId,
    pub date: NaiveDate,
    pub employee_id: EmployeeId,
    pub project_id: ProjectId,
    pub hours: Decimal,
    /// Fixed at creation; later rate changes never reprice this row.
    pub hourly_rate_snapshot: Decimal,
    pub note: Option<String>,
}

impl Entity for LaborAllocation {
    type Id = AllocationId;
    const NAME: &'static str = "labor allocation";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl LaborAllocation {
    pub fn new(
        employee: &Employee,
        project_id: ProjectId,
        date: NaiveDate,
        hours: Decimal,
        hours_per_day: Decimal,
        note: Option<String>,
    ) -> DomainResult<Self> {
        Self::check_hours(hours)?;
        Ok(Self {
            id: AllocationId::new(),
            date,
            employee_id: employee.id,
            project_id,
            hours,
            hourly_rate_snapshot: employee.hourly_rate(hours_per_day)?,
            note,
        })
    }

    /// Change the hours of an existing allocation. The rate snapshot stays.
    pub fn with_hours(mut self, hours: Decimal) -> DomainResult<Self> {
        Self::check_hours(hours)?;
        self.hours = hours;
        Ok(self)
    }

    pub fn cost(&self) -> Decimal {
        self.hours * self.hourly_rate_snapshot
    }

    fn check_hours(hours: Decimal) -> DomainResult<()> {
        ensure_positive(hours, "hours")?;
        if hours > MAX_HOURS_PER_DAY {
            return Err(DomainError::validation(format!(
                "{hours} hours exceed a single day"
            )));
        }
        Ok(())
    }
}
