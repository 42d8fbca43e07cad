//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_newtype {
    ($(#[$meta:meta])* $t:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Uuid);

        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered), so ordering by id follows creation order.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $t {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$t> for Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

uuid_newtype!(
    /// Catalog material.
    MaterialId,
    "MaterialId"
);
uuid_newtype!(
    /// Construction project (the unit every rollup is scoped by).
    ProjectId,
    "ProjectId"
);
uuid_newtype!(EmployeeId, "EmployeeId");
uuid_newtype!(
    /// Material stock movement (ledger row).
    MovementId,
    "MovementId"
);
uuid_newtype!(LeftoverId, "LeftoverId");
uuid_newtype!(LeftoverCreditId, "LeftoverCreditId");
uuid_newtype!(
    /// Daily labor allocation.
    AllocationId,
    "AllocationId"
);
uuid_newtype!(
    /// Legacy per-period labor entry.
    LaborEntryId,
    "LaborEntryId"
);
uuid_newtype!(CashMovementId, "CashMovementId");
uuid_newtype!(RevenueId, "RevenueId");
uuid_newtype!(CostId, "CostId");
uuid_newtype!(BudgetId, "BudgetId");
uuid_newtype!(BudgetItemId, "BudgetItemId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_strings() {
        let id = MaterialId::new();
        let parsed: MaterialId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invalid_id_names_the_type() {
        let err = "not-a-uuid".parse::<ProjectId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("ProjectId")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
