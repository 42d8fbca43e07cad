//! Leftovers: surplus material recovered from a project and re-applicable to
//! other projects as credits.
//!
//! The functions here only *plan* rows. Persisting a plan as one unit (and
//! undoing partial writes) is the caller's job.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use siteledger_core::{
    DomainError, DomainResult, Entity, LeftoverCreditId, LeftoverId, MaterialId, MovementId,
    ProjectId, ValueObject, ensure_non_negative, ensure_positive, round_money,
};

use crate::material::Material;
use crate::movement::{MaterialMovement, MovementKind};
use crate::units::UnitRules;

/// Scale used when a value draw is converted back into a quantity.
const QUANTITY_SCALE: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftoverRecord {
    pub id: LeftoverId,
    /// `None` for pre-catalog leftovers described only by free text.
    pub material_id: Option<MaterialId>,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub total_value: Decimal,
    pub origin_project_id: Option<ProjectId>,
    /// Warehouse-level adjustment written with the record (catalog leftovers only).
    pub linked_stock_movement_id: Option<MovementId>,
    /// Project-scoped leftover return, present iff an origin project is known.
    pub linked_origin_return_movement_id: Option<MovementId>,
    pub created_on: NaiveDate,
}

impl Entity for LeftoverRecord {
    type Id = LeftoverId;
    const NAME: &'static str = "leftover";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl LeftoverRecord {
    /// Ids of the ledger movements that live and die with this record.
    pub fn linked_movement_ids(&self) -> Vec<MovementId> {
        self.linked_stock_movement_id
            .into_iter()
            .chain(self.linked_origin_return_movement_id)
            .collect()
    }
}

/// One application of a leftover's balance to a destination project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftoverCredit {
    pub id: LeftoverCreditId,
    pub leftover_id: LeftoverId,
    pub destination_project_id: ProjectId,
    pub applied_quantity: Decimal,
    pub applied_value: Decimal,
    pub applied_on: NaiveDate,
    pub note: Option<String>,
}

impl Entity for LeftoverCredit {
    type Id = LeftoverCreditId;
    const NAME: &'static str = "leftover credit";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// What remains of a leftover after its credits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeftoverBalance {
    pub quantity_available: Decimal,
    pub value_available: Decimal,
}

impl ValueObject for LeftoverBalance {}

impl LeftoverBalance {
    pub fn is_exhausted(&self) -> bool {
        self.quantity_available <= Decimal::ZERO && self.value_available <= Decimal::ZERO
    }
}

pub fn leftover_balance<'a>(
    record: &LeftoverRecord,
    credits: impl IntoIterator<Item = &'a LeftoverCredit>,
) -> LeftoverBalance {
    let (qty, value) = credits
        .into_iter()
        .filter(|c| c.leftover_id == record.id)
        .fold((Decimal::ZERO, Decimal::ZERO), |(q, v), c| {
            (q + c.applied_quantity, v + c.applied_value)
        });

    LeftoverBalance {
        quantity_available: record.quantity - qty,
        value_available: record.total_value - value,
    }
}

/// Amount requested from a leftover; the other side is derived pro rata.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "amount", rename_all = "snake_case")]
pub enum LeftoverDraw {
    Quantity(Decimal),
    Value(Decimal),
}

/// Declared surplus of a catalog material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftoverRequest {
    pub quantity: Decimal,
    pub origin_project_id: Option<ProjectId>,
    pub occurred_on: NaiveDate,
    pub note: Option<String>,
}

/// Rows to write for one leftover, in write order: movements first, record last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftoverPlan {
    pub origin_return: Option<MaterialMovement>,
    pub stock_adjustment: Option<MaterialMovement>,
    pub record: LeftoverRecord,
}

impl LeftoverPlan {
    pub fn movements(&self) -> impl Iterator<Item = &MaterialMovement> {
        self.origin_return.iter().chain(self.stock_adjustment.iter())
    }
}

/// Plan a catalog leftover: value = quantity x reference price.
///
/// With an origin project, a project-scoped `leftover_return` reverses that
/// much of the project's material cost; the warehouse-level `adjustment`
/// puts the quantity back into global stock. The return is paired with the
/// adjustment so the quantity is counted once.
pub fn plan_leftover(
    material: &Material,
    request: &LeftoverRequest,
    rules: &UnitRules,
    money_scale: u32,
) -> DomainResult<LeftoverPlan> {
    let price = material.require_reference_price()?;
    ensure_positive(request.quantity, "quantity")?;
    rules.check(&material.unit, request.quantity)?;

    let total_value = round_money(request.quantity * price, money_scale);

    let stock_adjustment = MaterialMovement::new(
        material.id,
        None,
        MovementKind::Adjustment,
        request.quantity,
        total_value,
        request.occurred_on,
        request.note.clone(),
    )?;

    let origin_return = request
        .origin_project_id
        .map(|project_id| {
            MaterialMovement::new(
                material.id,
                Some(project_id),
                MovementKind::LeftoverReturn,
                request.quantity,
                total_value,
                request.occurred_on,
                request.note.clone(),
            )
            .map(|m| m.paired_with(stock_adjustment.id))
        })
        .transpose()?;

    let record = LeftoverRecord {
        id: LeftoverId::new(),
        material_id: Some(material.id),
        description: request.note.clone(),
        quantity: request.quantity,
        total_value,
        origin_project_id: request.origin_project_id,
        linked_stock_movement_id: Some(stock_adjustment.id),
        linked_origin_return_movement_id: origin_return.as_ref().map(|m| m.id),
        created_on: request.occurred_on,
    };

    Ok(LeftoverPlan {
        origin_return,
        stock_adjustment: Some(stock_adjustment),
        record,
    })
}

/// Plan a pre-catalog leftover that has no material and therefore no stock
/// movements; only the credit balance is tracked.
pub fn plan_loose_leftover(
    description: impl Into<String>,
    quantity: Decimal,
    total_value: Decimal,
    origin_project_id: Option<ProjectId>,
    created_on: NaiveDate,
) -> DomainResult<LeftoverPlan> {
    let description = description.into();
    if description.trim().is_empty() {
        return Err(DomainError::validation(
            "a leftover without material needs a description",
        ));
    }
    ensure_positive(quantity, "quantity")?;
    ensure_non_negative(total_value, "total_value")?;

    Ok(LeftoverPlan {
        origin_return: None,
        stock_adjustment: None,
        record: LeftoverRecord {
            id: LeftoverId::new(),
            material_id: None,
            description: Some(description),
            quantity,
            total_value,
            origin_project_id,
            linked_stock_movement_id: None,
            linked_origin_return_movement_id: None,
            created_on,
        },
    })
}

/// A draw against a leftover on behalf of a destination project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditRequest {
    pub destination_project_id: ProjectId,
    pub draw: LeftoverDraw,
    pub applied_on: NaiveDate,
    pub note: Option<String>,
}

/// Plan a credit from `record` for `request`.
///
/// Both sides (quantity and value) are checked against what remains. The
/// derived side of a partial draw is truncated, so drawing the whole
/// remainder of one side takes exactly the remainder of the other. Catalog
/// leftovers pass their material's unit so credited quantities follow the
/// same unit rules as usage.
pub fn plan_credit<'a>(
    record: &LeftoverRecord,
    credits: impl IntoIterator<Item = &'a LeftoverCredit>,
    request: CreditRequest,
    unit: Option<(&str, &UnitRules)>,
    money_scale: u32,
) -> DomainResult<LeftoverCredit> {
    let available = leftover_balance(record, credits);
    let check_unit = |quantity: Decimal| match unit {
        Some((unit, rules)) => rules.check(unit, quantity),
        None => Ok(()),
    };

    let (quantity, value) = match request.draw {
        LeftoverDraw::Quantity(q) => {
            ensure_positive(q, "quantity")?;
            check_unit(q)?;
            if q > available.quantity_available {
                return Err(DomainError::insufficient(q, available.quantity_available));
            }
            let value = if q == available.quantity_available {
                available.value_available
            } else {
                (q * record.total_value / record.quantity)
                    .round_dp_with_strategy(money_scale, RoundingStrategy::ToZero)
            };
            (q, value)
        }
        LeftoverDraw::Value(v) => {
            ensure_positive(v, "value")?;
            if record.total_value.is_zero() {
                return Err(DomainError::validation(
                    "leftover has no value to draw from",
                ));
            }
            if v > available.value_available {
                return Err(DomainError::insufficient(v, available.value_available));
            }
            let quantity = if v == available.value_available {
                available.quantity_available
            } else {
                (v * record.quantity / record.total_value)
                    .round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::ToZero)
            };
            check_unit(quantity)?;
            (quantity, v)
        }
    };

    if quantity > available.quantity_available {
        return Err(DomainError::insufficient(
            quantity,
            available.quantity_available,
        ));
    }
    if value > available.value_available {
        return Err(DomainError::insufficient(value, available.value_available));
    }

    Ok(LeftoverCredit {
        id: LeftoverCreditId::new(),
        leftover_id: record.id,
        destination_project_id: request.destination_project_id,
        applied_quantity: quantity,
        applied_value: value,
        applied_on: request.applied_on,
        note: request.note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{project_material_cost, stock_balance};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use siteledger_core::DateRange;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn priced() -> Material {
        Material::new("Ceramic tile box", "un", Some(dec!(10.00))).unwrap()
    }

    fn request(qty: Decimal, origin: Option<ProjectId>) -> LeftoverRequest {
        LeftoverRequest {
            quantity: qty,
            origin_project_id: origin,
            occurred_on: day(1),
            note: None,
        }
    }

    #[test]
    fn leftover_with_origin_plans_both_movements() {
        let m = priced();
        let origin = ProjectId::new();
        let plan = plan_leftover(&m, &request(dec!(20), Some(origin)), &UnitRules::default(), 2)
            .unwrap();

        let ret = plan.origin_return.as_ref().unwrap();
        let adj = plan.stock_adjustment.as_ref().unwrap();
        assert_eq!(ret.kind, MovementKind::LeftoverReturn);
        assert_eq!(ret.project_id, Some(origin));
        assert_eq!(ret.paired_movement_id, Some(adj.id));
        assert_eq!(adj.kind, MovementKind::Adjustment);
        assert!(adj.is_warehouse_level());
        assert_eq!(plan.record.total_value, dec!(200.00));
        assert_eq!(plan.record.linked_stock_movement_id, Some(adj.id));
        assert_eq!(plan.record.linked_origin_return_movement_id, Some(ret.id));
        assert_eq!(plan.record.linked_movement_ids().len(), 2);

        let movements: Vec<_> = plan.movements().cloned().collect();
        assert_eq!(
            project_material_cost(origin, &DateRange::all_time(), &movements),
            dec!(-200.00)
        );
    }

    #[test]
    fn leftover_without_origin_only_adjusts_stock() {
        let m = priced();
        let plan = plan_leftover(&m, &request(dec!(5), None), &UnitRules::default(), 2).unwrap();
        assert!(plan.origin_return.is_none());
        assert_eq!(plan.movements().count(), 1);
        assert_eq!(plan.record.linked_origin_return_movement_id, None);
    }

    #[test]
    fn unpriced_material_cannot_become_a_leftover() {
        let m = Material::new("Unpriced pipe", "un", None).unwrap();
        let err = plan_leftover(&m, &request(dec!(1), None), &UnitRules::default(), 2).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn loose_leftover_needs_description() {
        assert!(plan_loose_leftover(" ", dec!(1), dec!(5), None, day(1)).is_err());
        let plan = plan_loose_leftover("old doors", dec!(2), dec!(80), None, day(1)).unwrap();
        assert_eq!(plan.movements().count(), 0);
        assert_eq!(plan.record.material_id, None);
    }

    fn credit_request(dest: ProjectId, draw: LeftoverDraw) -> CreditRequest {
        CreditRequest {
            destination_project_id: dest,
            draw,
            applied_on: day(2),
            note: None,
        }
    }

    fn record(qty: Decimal, value: Decimal) -> LeftoverRecord {
        plan_loose_leftover("surplus", qty, value, None, day(1))
            .unwrap()
            .record
    }

    #[test]
    fn quantity_draw_derives_value_pro_rata() {
        let r = record(dec!(20), dec!(200.00));
        let credit = plan_credit(
            &r,
            &[],
            credit_request(ProjectId::new(), LeftoverDraw::Quantity(dec!(5))),
            None,
            2,
        )
        .unwrap();
        assert_eq!(credit.applied_quantity, dec!(5));
        assert_eq!(credit.applied_value, dec!(50.00));
    }

    #[test]
    fn drawing_the_remainder_takes_exact_value() {
        let r = record(dec!(3), dec!(10.00));
        let dest = ProjectId::new();
        let mut credits = Vec::new();
        for _ in 0..3 {
            let c = plan_credit(
                &r,
                &credits,
                credit_request(dest, LeftoverDraw::Quantity(dec!(1))),
                None,
                2,
            )
            .unwrap();
            credits.push(c);
        }
        let balance = leftover_balance(&r, &credits);
        assert_eq!(balance.quantity_available, dec!(0));
        assert_eq!(balance.value_available, dec!(0));
        assert!(balance.is_exhausted());
    }

    #[test]
    fn over_draw_is_insufficient_balance() {
        let r = record(dec!(10), dec!(100));
        let dest = ProjectId::new();
        let first = plan_credit(
            &r,
            &[],
            credit_request(dest, LeftoverDraw::Value(dec!(60))),
            None,
            2,
        )
        .unwrap();
        assert_eq!(first.applied_quantity, dec!(6));

        let err = plan_credit(
            &r,
            std::slice::from_ref(&first),
            credit_request(dest, LeftoverDraw::Quantity(dec!(5))),
            None,
            2,
        )
        .unwrap_err();
        assert_eq!(err, DomainError::insufficient(dec!(5), dec!(4)));

        let err = plan_credit(
            &r,
            std::slice::from_ref(&first),
            credit_request(dest, LeftoverDraw::Value(dec!(40.01))),
            None,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientBalance { .. }));
    }

    #[test]
    fn catalog_draws_follow_unit_rules() {
        let m = priced();
        let rules = UnitRules::default();
        let plan = plan_leftover(&m, &request(dec!(10), None), &rules, 2).unwrap();
        let dest = ProjectId::new();
        let unit = Some((m.unit.as_str(), &rules));

        let err = plan_credit(
            &plan.record,
            &[],
            credit_request(dest, LeftoverDraw::Quantity(dec!(2.5))),
            unit,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = plan_credit(
            &plan.record,
            &[],
            credit_request(dest, LeftoverDraw::Value(dec!(15))),
            unit,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let credit = plan_credit(
            &plan.record,
            &[],
            credit_request(dest, LeftoverDraw::Quantity(dec!(2))),
            unit,
            2,
        )
        .unwrap();
        assert_eq!(credit.applied_value, dec!(20.00));
    }

    #[test]
    fn tiny_values_never_strand_quantity() {
        let r = record(dec!(4), dec!(0.02));
        let dest = ProjectId::new();
        let mut credits = Vec::new();
        for _ in 0..4 {
            let c = plan_credit(
                &r,
                &credits,
                credit_request(dest, LeftoverDraw::Quantity(dec!(1))),
                None,
                2,
            )
            .unwrap();
            credits.push(c);
        }
        let values: Vec<_> = credits.iter().map(|c| c.applied_value).collect();
        assert_eq!(values, vec![dec!(0), dec!(0), dec!(0), dec!(0.02)]);
        assert!(leftover_balance(&r, &credits).is_exhausted());
    }

    #[test]
    fn partial_value_draws_truncate_quantity() {
        let r = record(dec!(3), dec!(10.00));
        let credit = plan_credit(
            &r,
            &[],
            credit_request(ProjectId::new(), LeftoverDraw::Value(dec!(5))),
            None,
            2,
        )
        .unwrap();
        assert_eq!(credit.applied_quantity, dec!(1.5));

        let credit = plan_credit(
            &r,
            &[],
            credit_request(ProjectId::new(), LeftoverDraw::Value(dec!(6.66))),
            None,
            2,
        )
        .unwrap();
        assert_eq!(credit.applied_quantity, dec!(1.998));
    }

    #[test]
    fn zero_draw_is_validation_error() {
        let r = record(dec!(10), dec!(100));
        let err = plan_credit(
            &r,
            &[],
            credit_request(ProjectId::new(), LeftoverDraw::Quantity(dec!(0))),
            None,
            2,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    fn draw_strategy() -> impl Strategy<Value = LeftoverDraw> {
        prop_oneof![
            (1i64..40).prop_map(|q| LeftoverDraw::Quantity(Decimal::from(q))),
            (1i64..400_00).prop_map(|cents| LeftoverDraw::Value(Decimal::new(cents, 2))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: no sequence of draws, successful or not, can push applied
        /// quantity or value past the original leftover.
        #[test]
        fn credits_never_exceed_the_leftover(
            draws in prop::collection::vec(draw_strategy(), 1..30),
        ) {
            let r = record(dec!(25), dec!(312.50));
            let dest = ProjectId::new();
            let mut credits: Vec<LeftoverCredit> = Vec::new();

            for draw in draws {
                let before = leftover_balance(&r, &credits);
                match plan_credit(&r, &credits, credit_request(dest, draw), None, 2) {
                    Ok(c) => credits.push(c),
                    Err(DomainError::InsufficientBalance { .. }) => {
                        prop_assert_eq!(leftover_balance(&r, &credits), before);
                    }
                    Err(other) => prop_assert!(false, "unexpected error {:?}", other),
                }
                let after = leftover_balance(&r, &credits);
                prop_assert!(after.quantity_available >= Decimal::ZERO);
                prop_assert!(after.value_available >= Decimal::ZERO);
            }
        }
    }

    #[test]
    fn leftover_movements_restore_stock_when_removed() {
        let m = priced();
        let stock = vec![
            MaterialMovement::new(
                m.id,
                None,
                MovementKind::Adjustment,
                dec!(50),
                dec!(500),
                day(1),
                None,
            )
            .unwrap(),
        ];
        let origin = Some(ProjectId::new());
        let plan = plan_leftover(&m, &request(dec!(20), origin), &UnitRules::default(), 2).unwrap();

        let mut with_leftover = stock.clone();
        with_leftover.extend(plan.movements().cloned());
        assert_eq!(with_leftover.len(), 3);
        assert_eq!(stock_balance(m.id, &with_leftover), dec!(70));

        with_leftover.retain(|mv| !plan.record.linked_movement_ids().contains(&mv.id));
        assert_eq!(stock_balance(m.id, &with_leftover), dec!(50));
    }
}
