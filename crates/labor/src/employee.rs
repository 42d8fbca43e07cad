use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use siteledger_core::{
    DomainError, DomainResult, EmployeeId, Entity, ensure_non_negative, ensure_positive,
};

/// How an employee's `current_rate` is expressed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    Hourly,
    Daily,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub billing: BillingType,
    /// Rate per hour or per day (see `billing`). Mutable over time; legacy
    /// entries are always priced with the value current at read time.
    pub current_rate: Decimal,
}

impl Entity for Employee {
    type Id = EmployeeId;
    const NAME: &'static str = "employee";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Employee {
    pub fn new(
        name: impl Into<String>,
        billing: BillingType,
        current_rate: Decimal,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("employee name cannot be empty"));
        }
        ensure_non_negative(current_rate, "current_rate")?;
        Ok(Self {
            id: EmployeeId::new(),
            name,
            billing,
            current_rate,
        })
    }

    /// Current rate expressed per hour.
    ///
    /// Daily rates are spread over `hours_per_day` standard hours.
    pub fn hourly_rate(&self, hours_per_day: Decimal) -> DomainResult<Decimal> {
        match self.billing {
            BillingType::Hourly => Ok(self.current_rate),
            BillingType::Daily => {
                ensure_positive(hours_per_day, "hours_per_day")?;
                Ok((self.current_rate / hours_per_day).round_dp(4))
            }
        }
    }
}
