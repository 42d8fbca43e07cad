mod common;

use common::{day, engine};
use rust_decimal_macros::dec;

use siteledger_core::{DateRange, EmployeeId, ProjectId};
use siteledger_labor::{BillingType, LaborEntry, LaborSource};

#[test]
fn allocations_replace_legacy_entries_for_the_range() {
    let engine = engine();
    let p = engine.projects.add_project("P", None).unwrap();
    let e = engine
        .labor
        .add_employee("E", BillingType::Hourly, dec!(25.00))
        .unwrap();
    engine
        .labor
        .record_labor_entry(e.id, p.id, day(5, 6), dec!(8), None)
        .unwrap();

    let may = DateRange::between(day(5, 1), day(5, 31)).unwrap();
    let cost = engine.labor.project_labor_cost(p.id, &may).unwrap();
    assert_eq!(cost.source, LaborSource::LegacyEntries);
    assert_eq!(cost.amount, dec!(200.00));

    engine.labor.set_employee_rate(e.id, dec!(20.00)).unwrap();
    engine
        .labor
        .record_allocation(e.id, p.id, day(5, 7), dec!(4), None)
        .unwrap();

    let cost = engine.labor.project_labor_cost(p.id, &may).unwrap();
    assert_eq!(cost.source, LaborSource::DailyAllocations);
    assert_eq!(cost.amount, dec!(80.00));
    assert_eq!(cost.excluded_legacy_rows, 1);

    // Outside the allocation's range the legacy entry counts again, at the
    // current rate.
    let first_week = DateRange::between(day(5, 1), day(5, 6)).unwrap();
    let cost = engine.labor.project_labor_cost(p.id, &first_week).unwrap();
    assert_eq!(cost.source, LaborSource::LegacyEntries);
    assert_eq!(cost.amount, dec!(160.00));
}

#[test]
fn allocation_snapshot_survives_rate_changes() {
    let engine = engine();
    let p = engine.projects.add_project("P", None).unwrap();
    let e = engine
        .labor
        .add_employee("Daily worker", BillingType::Daily, dec!(200))
        .unwrap();
    let alloc = engine
        .labor
        .record_allocation(e.id, p.id, day(6, 1), dec!(6), None)
        .unwrap();
    assert_eq!(alloc.hourly_rate_snapshot, dec!(25));

    engine.labor.set_employee_rate(e.id, dec!(400)).unwrap();
    let updated = engine.labor.update_allocation_hours(alloc.id, dec!(8)).unwrap();
    assert_eq!(updated.hourly_rate_snapshot, dec!(25));

    let cost = engine
        .labor
        .project_labor_cost(p.id, &DateRange::all_time())
        .unwrap();
    assert_eq!(cost.amount, dec!(200));
}

#[test]
fn allocation_hours_are_bounded() {
    let engine = engine();
    let p = engine.projects.add_project("P", None).unwrap();
    let e = engine
        .labor
        .add_employee("E", BillingType::Hourly, dec!(10))
        .unwrap();
    assert!(engine.labor.record_allocation(e.id, p.id, day(1, 1), dec!(0), None).is_err());
    assert!(engine.labor.record_allocation(e.id, p.id, day(1, 1), dec!(24.5), None).is_err());
    assert!(
        engine
            .labor
            .record_allocation(EmployeeId::new(), p.id, day(1, 1), dec!(1), None)
            .unwrap_err()
            .is_not_found()
    );
}

#[test]
fn labor_against_unknown_project_is_not_found() {
    let engine = engine();
    let e = engine
        .labor
        .add_employee("E", BillingType::Hourly, dec!(20))
        .unwrap();
    let ghost = ProjectId::new();

    let err = engine
        .labor
        .record_allocation(e.id, ghost, day(2, 1), dec!(4), None)
        .unwrap_err();
    assert!(err.is_not_found());
    let err = engine
        .labor
        .record_labor_entry(e.id, ghost, day(2, 1), dec!(1), None)
        .unwrap_err();
    assert!(err.is_not_found());

    assert!(engine.store.allocations.list().unwrap().is_empty());
    assert!(engine.store.labor_entries.list().unwrap().is_empty());
}

#[test]
fn entries_of_removed_employees_cost_nothing() {
    let engine = engine();
    let p = engine.projects.add_project("P", None).unwrap();
    let e = engine
        .labor
        .add_employee("E", BillingType::Hourly, dec!(30))
        .unwrap();
    engine
        .labor
        .record_labor_entry(e.id, p.id, day(2, 1), dec!(2), None)
        .unwrap();
    // A row imported for an employee that is gone.
    let orphan = LaborEntry::new(p.id, EmployeeId::new(), day(2, 2), dec!(5), None).unwrap();
    engine.store.labor_entries.insert(orphan).unwrap();

    let cost = engine
        .labor
        .project_labor_cost(p.id, &DateRange::all_time())
        .unwrap();
    assert_eq!(cost.amount, dec!(60));
    assert_eq!(cost.missing_employee_rows, 1);
}

#[test]
fn company_labor_applies_the_switch_per_project() {
    let engine = engine();
    let a = engine.projects.add_project("A", None).unwrap();
    let b = engine.projects.add_project("B", None).unwrap();
    let e = engine
        .labor
        .add_employee("E", BillingType::Hourly, dec!(10))
        .unwrap();
    engine.labor.record_labor_entry(e.id, a.id, day(3, 1), dec!(5), None).unwrap();
    engine.labor.record_labor_entry(e.id, b.id, day(3, 1), dec!(5), None).unwrap();
    engine.labor.record_allocation(e.id, b.id, day(3, 2), dec!(1), None).unwrap();

    let cost = engine.labor.company_labor_cost(&DateRange::all_time()).unwrap();
    assert_eq!(cost.total, dec!(60));
    assert_eq!(cost.projects.len(), 2);
}
