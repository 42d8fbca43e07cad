//! Leftover create/delete sagas.
//!
//! Create: linked movements first, record last. Delete: record first, then
//! its linked movements. A failure at any step undoes the earlier steps.

use tracing::warn;

use siteledger_core::{DomainError, Entity, LeftoverId};
use siteledger_inventory::{LeftoverPlan, LeftoverRecord};

use super::Compensations;
use crate::error::ServiceResult;
use crate::store::{LedgerStore, StoreError};

pub fn create(store: &LedgerStore, plan: LeftoverPlan) -> ServiceResult<LeftoverRecord> {
    let movements = &store.movements;
    let mut undo = Compensations::new("create leftover");

    for movement in plan.movements() {
        if let Err(e) = movements.insert(movement.clone()) {
            return Err(undo.abort(e));
        }
        let id = movement.id;
        undo.record(format!("delete movement {id}"), move || {
            movements.delete(&id).map(|_| ())
        });
    }

    if let Err(e) = store.leftovers.insert(plan.record.clone()) {
        return Err(undo.abort(e));
    }

    undo.commit();
    Ok(plan.record)
}

/// Remove a leftover and its linked movements. Refused once credits exist:
/// the destination projects' costs would otherwise lose their backing.
pub fn delete(store: &LedgerStore, id: LeftoverId) -> ServiceResult<LeftoverRecord> {
    let record = store
        .leftovers
        .get(&id)?
        .ok_or_else(|| DomainError::not_found(LeftoverRecord::NAME, id))?;

    let credits = store.leftover_credits.find(&|c| c.leftover_id == id)?;
    if !credits.is_empty() {
        return Err(DomainError::invariant(format!(
            "leftover {id} has {} applied credit(s) and cannot be deleted",
            credits.len()
        ))
        .into());
    }

    let leftovers = &store.leftovers;
    let movements = &store.movements;
    let mut undo = Compensations::new("delete leftover");

    let removed = match leftovers.delete(&id) {
        Ok(r) => r,
        Err(e) => return Err(undo.abort(e)),
    };
    let restore = removed.clone();
    undo.record(format!("restore leftover {id}"), move || leftovers.insert(restore));

    for movement_id in record.linked_movement_ids() {
        match movements.delete(&movement_id) {
            Ok(movement) => {
                undo.record(format!("restore movement {movement_id}"), move || {
                    movements.insert(movement)
                });
            }
            Err(StoreError::Missing { .. }) => {
                warn!(leftover = %id, movement = %movement_id, "linked movement already gone");
            }
            Err(e) => return Err(undo.abort(e)),
        }
    }

    undo.commit();
    Ok(removed)
}
