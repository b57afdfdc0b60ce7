// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle tests for the store's write operations.

use crate::clock::FixedClock;
use crate::collaborators::{NoDeliveries, NullPublisher, SequentialAllocator, SpeciesChangedEvent};
use crate::error::StoreError;
use crate::gates::AllowAll;
use crate::store::AccessionStore;
use seed_bank_domain::{
    Accession, AccessionId, AccessionState, FacilityId, ProcessingMethod, SeedQuantity, SpeciesId,
    UserId, ViabilityTest, ViabilityTestType, Withdrawal, WithdrawalPurpose,
};
use time::macros::{date, datetime};

use super::helpers::{
    CURATOR, ConstantAllocator, FixedDeliveries, NURSERY, RecordingPublisher, clock, count_draft,
    directory, draft, store,
};

/// Creates, checks in, and measures an accession, leaving it in
/// `Processing` with `total_seeds` remaining.
fn processing_accession(
    store: &mut AccessionStore,
    clock: &FixedClock,
    total_seeds: u32,
) -> AccessionId {
    let created: Accession = store.create(clock, &CURATOR, draft()).unwrap();
    let id: AccessionId = created.id.unwrap();
    store.check_in(clock, &CURATOR, id).unwrap();
    store
        .update(clock, &CURATOR, id, |mut accession| {
            accession.processing_method = Some(ProcessingMethod::Count);
            accession.total = Some(SeedQuantity::seeds(total_seeds));
            accession
        })
        .unwrap();
    id
}

#[test]
fn test_create_assigns_number_and_defaults() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();

    let first: Accession = store.create(&clock, &CURATOR, count_draft(100)).unwrap();
    assert_eq!(first.id, Some(AccessionId::new(1)));
    assert_eq!(first.accession_number.as_deref(), Some("26-1-001"));
    assert_eq!(first.state, AccessionState::AwaitingCheckIn);
    assert_eq!(first.remaining, Some(SeedQuantity::seeds(100)));
    assert!(first.checked_in_time.is_none());

    let second: Accession = store.create(&clock, &CURATOR, draft()).unwrap();
    assert_eq!(second.accession_number.as_deref(), Some("26-1-002"));
}

#[test]
fn test_create_rejects_nursery_facility() {
    let mut store: AccessionStore = store();
    let mut accession: Accession = draft();
    accession.facility_id = NURSERY;

    let error = store.create(&clock(), &CURATOR, accession).unwrap_err();
    assert!(matches!(error, StoreError::FacilityTypeMismatch));
}

#[test]
fn test_create_rejects_unknown_facility() {
    let mut store: AccessionStore = store();
    let mut accession: Accession = draft();
    accession.facility_id = FacilityId::new(9);

    let error = store.create(&clock(), &CURATOR, accession).unwrap_err();
    assert!(matches!(
        error,
        StoreError::FacilityNotFound(id) if id == FacilityId::new(9)
    ));
}

#[test]
fn test_create_validates_sub_location() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();

    let mut unknown: Accession = draft();
    unknown.sub_location = Some(String::from("Basement"));
    let error = store.create(&clock, &CURATOR, unknown).unwrap_err();
    assert!(matches!(
        error,
        StoreError::SubLocationUnknown(name) if name == "Basement"
    ));

    let mut known: Accession = draft();
    known.sub_location = Some(String::from("Freezer A"));
    let created: Accession = store.create(&clock, &CURATOR, known).unwrap();
    assert_eq!(created.sub_location.as_deref(), Some("Freezer A"));
}

#[test]
fn test_create_gives_up_after_bounded_number_collisions() {
    let mut store: AccessionStore = AccessionStore::new(
        directory(),
        Box::new(AllowAll),
        Box::new(ConstantAllocator("26-1-001")),
        Box::new(NoDeliveries),
        Box::new(NullPublisher),
    );
    let clock: FixedClock = clock();

    store.create(&clock, &CURATOR, draft()).unwrap();
    let error = store.create(&clock, &CURATOR, draft()).unwrap_err();
    assert!(matches!(
        error,
        StoreError::DuplicateAccessionNumber { attempts: 10 }
    ));
}

#[test]
fn test_create_forces_identity_and_audit_fields() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = FixedClock::new(datetime!(2026-04-03 09:00 UTC));

    let mut accession: Accession = draft();
    accession.id = Some(AccessionId::new(999));
    accession.accession_number = Some(String::from("FORGED"));
    accession.created_by = UserId::new(99);
    accession.created_time = datetime!(2020-01-01 00:00 UTC);
    accession.checked_in_time = Some(datetime!(2020-01-02 00:00 UTC));

    let created: Accession = store.create(&clock, &CURATOR, accession).unwrap();
    assert_eq!(created.id, Some(AccessionId::new(1)));
    assert_eq!(created.accession_number.as_deref(), Some("26-1-001"));
    assert_eq!(created.created_by, CURATOR.user_id);
    assert_eq!(created.created_time, datetime!(2026-04-03 09:00 UTC));
    assert!(created.checked_in_time.is_none());
}

#[test]
fn test_check_in_transitions_and_truncates_seconds() {
    let mut store: AccessionStore = store();
    let created: Accession = store.create(&clock(), &CURATOR, draft()).unwrap();
    let id: AccessionId = created.id.unwrap();

    let later: FixedClock = FixedClock::new(datetime!(2026-04-02 08:30:15.5 UTC));
    let checked_in: Accession = store.check_in(&later, &CURATOR, id).unwrap();

    assert_eq!(checked_in.state, AccessionState::AwaitingProcessing);
    assert_eq!(
        checked_in.checked_in_time,
        Some(datetime!(2026-04-02 08:30:15 UTC))
    );
}

#[test]
fn test_check_in_is_idempotent() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let created: Accession = store.create(&clock, &CURATOR, draft()).unwrap();
    let id: AccessionId = created.id.unwrap();

    let first: Accession = store.check_in(&clock, &CURATOR, id).unwrap();
    let history_len: usize = store.fetch_history(&CURATOR, id).unwrap().len();

    clock.advance(time::Duration::hours(3));
    let second: Accession = store.check_in(&clock, &CURATOR, id).unwrap();

    assert_eq!(second.checked_in_time, first.checked_in_time);
    assert_eq!(second.state, AccessionState::AwaitingProcessing);
    assert_eq!(store.fetch_history(&CURATOR, id).unwrap().len(), history_len);
}

#[test]
fn test_check_in_unknown_accession() {
    let mut store: AccessionStore = store();
    let error = store
        .check_in(&clock(), &CURATOR, AccessionId::new(42))
        .unwrap_err();
    assert!(matches!(
        error,
        StoreError::AccessionNotFound(id) if id == AccessionId::new(42)
    ));
}

#[test]
fn test_entering_quantity_starts_processing() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);

    let accession: Accession = store.fetch_one_by_id(&CURATOR, id).unwrap();
    assert_eq!(accession.state, AccessionState::Processing);
    assert_eq!(accession.remaining, Some(SeedQuantity::seeds(100)));

    let history = store.fetch_history(&CURATOR, id).unwrap();
    assert!(
        history
            .iter()
            .any(|entry| entry.description == "updated the quantity to 100 seeds")
    );
    assert!(
        history
            .iter()
            .any(|entry| entry.description == "updated the status to Processing")
    );
}

#[test]
fn test_withdrawal_recomputes_remaining() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);

    clock.advance(time::Duration::days(4));
    let updated: Accession = store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.withdrawals.push(Withdrawal::new(
                date!(2026 - 04 - 05),
                WithdrawalPurpose::Research,
                SeedQuantity::seeds(10),
            ));
            accession
        })
        .unwrap();

    assert_eq!(updated.remaining, Some(SeedQuantity::seeds(90)));
    assert!(updated.withdrawals[0].id.is_some());

    let history = store.fetch_history(&CURATOR, id).unwrap();
    assert!(
        history
            .iter()
            .any(|entry| entry.description == "withdrew 10 seeds for research")
    );
}

#[test]
fn test_exhausting_the_lot_forces_used_up() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 10);

    let updated: Accession = store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.withdrawals.push(Withdrawal::new(
                date!(2026 - 04 - 02),
                WithdrawalPurpose::Outplanting,
                SeedQuantity::seeds(10),
            ));
            accession
        })
        .unwrap();

    assert_eq!(updated.state, AccessionState::UsedUp);
    assert!(updated.remaining.unwrap().is_zero());

    let history = store.fetch_history(&CURATOR, id).unwrap();
    assert!(
        history
            .iter()
            .any(|entry| entry.description == "updated the status to Used Up")
    );
}

#[test]
fn test_update_preserves_identity_fields() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);
    let before: Accession = store.fetch_one_by_id(&CURATOR, id).unwrap();

    let updated: Accession = store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.id = Some(AccessionId::new(999));
            accession.accession_number = Some(String::from("FORGED"));
            accession.created_by = UserId::new(99);
            accession.created_time = datetime!(2020-01-01 00:00 UTC);
            accession.checked_in_time = None;
            accession
        })
        .unwrap();

    assert_eq!(updated.id, before.id);
    assert_eq!(updated.accession_number, before.accession_number);
    assert_eq!(updated.created_by, before.created_by);
    assert_eq!(updated.created_time, before.created_time);
    assert_eq!(updated.checked_in_time, before.checked_in_time);
}

#[test]
fn test_new_viability_test_gets_linked_withdrawal() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);

    let updated: Accession = store
        .update(&clock, &CURATOR, id, |mut accession| {
            let mut test: ViabilityTest =
                ViabilityTest::new(ViabilityTestType::Lab, date!(2026 - 04 - 01));
            test.seeds_tested = Some(5);
            test.staff_responsible = Some(String::from("Dana Kim"));
            accession.viability_tests.push(test);
            accession
        })
        .unwrap();

    let test_id = updated.viability_tests[0].id;
    assert!(test_id.is_some());

    let system_rows: Vec<&Withdrawal> = updated
        .withdrawals
        .iter()
        .filter(|w| w.purpose == WithdrawalPurpose::ViabilityTesting)
        .collect();
    assert_eq!(system_rows.len(), 1);
    assert_eq!(system_rows[0].viability_test_id, test_id);
    assert!(system_rows[0].id.is_some());
    assert_eq!(system_rows[0].withdrawn, SeedQuantity::seeds(5));
    assert_eq!(updated.remaining, Some(SeedQuantity::seeds(95)));
}

#[test]
fn test_species_change_publishes_event() {
    let (publisher, events) = RecordingPublisher::new();
    let mut store: AccessionStore = AccessionStore::new(
        directory(),
        Box::new(AllowAll),
        Box::new(SequentialAllocator::new()),
        Box::new(NoDeliveries),
        Box::new(publisher),
    );
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);

    store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.species_id = Some(SpeciesId::new(5));
            accession
        })
        .unwrap();

    let published: Vec<SpeciesChangedEvent> = events.borrow().clone();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].accession_id, id);
    assert_eq!(published[0].old_species_id, None);
    assert_eq!(published[0].new_species_id, Some(SpeciesId::new(5)));
}

#[test]
fn test_species_change_blocked_by_deliveries() {
    let (deliveries, delivered) = FixedDeliveries::new();
    let mut store: AccessionStore = AccessionStore::new(
        directory(),
        Box::new(AllowAll),
        Box::new(SequentialAllocator::new()),
        Box::new(deliveries),
        Box::new(NullPublisher),
    );
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);
    delivered.borrow_mut().insert(id);

    let error = store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.species_id = Some(SpeciesId::new(5));
            accession
        })
        .unwrap_err();
    assert!(matches!(error, StoreError::SpeciesHasDeliveries));
}

#[test]
fn test_update_surfaces_engine_violations() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);
    store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.withdrawals.push(Withdrawal::new(
                date!(2026 - 04 - 02),
                WithdrawalPurpose::Research,
                SeedQuantity::seeds(1),
            ));
            accession
        })
        .unwrap();

    let error = store
        .update(&clock, &CURATOR, id, |mut accession| {
            accession.processing_method = Some(ProcessingMethod::Weight);
            accession
        })
        .unwrap_err();
    assert!(matches!(error, StoreError::Validation(_)));
}

#[test]
fn test_dry_run_persists_nothing() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);
    let history_len: usize = store.fetch_history(&CURATOR, id).unwrap().len();

    let previewed: Accession = store
        .dry_run(&clock, &CURATOR, id, |mut accession| {
            accession.withdrawals.push(Withdrawal::new(
                date!(2026 - 04 - 02),
                WithdrawalPurpose::Research,
                SeedQuantity::seeds(10),
            ));
            accession
        })
        .unwrap();

    assert_eq!(previewed.remaining, Some(SeedQuantity::seeds(90)));
    assert!(previewed.withdrawals[0].id.is_none());

    let persisted: Accession = store.fetch_one_by_id(&CURATOR, id).unwrap();
    assert_eq!(persisted.remaining, Some(SeedQuantity::seeds(100)));
    assert!(persisted.withdrawals.is_empty());
    assert_eq!(store.fetch_history(&CURATOR, id).unwrap().len(), history_len);
}

#[test]
fn test_delete_removes_the_accession() {
    let mut store: AccessionStore = store();
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);

    store.delete(&CURATOR, id).unwrap();
    let error = store.fetch_one_by_id(&CURATOR, id).unwrap_err();
    assert!(matches!(error, StoreError::AccessionNotFound(_)));
}

#[test]
fn test_delete_blocked_by_deliveries() {
    let (deliveries, delivered) = FixedDeliveries::new();
    let mut store: AccessionStore = AccessionStore::new(
        directory(),
        Box::new(AllowAll),
        Box::new(SequentialAllocator::new()),
        Box::new(deliveries),
        Box::new(NullPublisher),
    );
    let clock: FixedClock = clock();
    let id: AccessionId = processing_accession(&mut store, &clock, 100);
    delivered.borrow_mut().insert(id);

    let error = store.delete(&CURATOR, id).unwrap_err();
    assert!(matches!(error, StoreError::AccessionHasDeliveries));
    assert!(store.fetch_one_by_id(&CURATOR, id).is_ok());
}
