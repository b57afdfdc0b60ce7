// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The accession store.
//!
//! Operations follow a fixed shape: authorize, validate, reconcile through
//! the engine, then apply the outcome to the in-memory repository in one
//! step. Every fallible check happens before the first write, so a failed
//! operation never leaves partial state behind.

use crate::clock::Clock;
use crate::collaborators::{
    AccessionNumberAllocator, DeliveryLookup, EventPublisher, SpeciesChangedEvent,
};
use crate::directory::{FacilityDirectory, FacilityInfo, FacilityType};
use crate::error::StoreError;
use crate::gates::{AccessDecision, AccessionOperation, AuthorizationGate, Principal};
use seed_bank::{REASON_CREATED, ReconcileOutcome, check_in_transition, reconcile};
use seed_bank_domain::{
    Accession, AccessionId, AccessionState, FacilityId, OrganizationId, QuantityHistoryEntry,
    QuantityHistoryId, StateHistoryEntry, StateHistoryId, UserId, ViabilityTestId, WithdrawalId,
    WithdrawalPurpose, estimate_seed_count,
};
use seed_bank_history::{HistoryEntry, UserProfile, build_history};
use std::collections::{BTreeMap, HashMap};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// How many accession-number candidates to try before giving up.
const NUMBER_ALLOCATION_ATTEMPTS: u32 = 10;

/// One accession plus its append-only history logs.
#[derive(Debug, Clone)]
pub struct AccessionRecord {
    /// The current accession state.
    pub accession: Accession,
    /// Every state transition, in insertion order.
    pub state_history: Vec<StateHistoryEntry>,
    /// Every remaining-quantity change, in insertion order.
    pub quantity_history: Vec<QuantityHistoryEntry>,
}

/// Which accessions an aggregate query ranges over.
#[derive(Debug, Clone)]
pub enum SummaryScope {
    /// Every accession at one facility.
    Facility(FacilityId),
    /// Every accession at every facility of one organization.
    Organization(OrganizationId),
    /// An explicit set of accessions.
    Accessions(Vec<AccessionId>),
}

/// Aggregate numbers for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryStatistics {
    /// Accessions in scope.
    pub accessions: usize,
    /// Accessions still holding seeds.
    pub active_accessions: usize,
    /// Seeds remaining across active accessions: exact counts for
    /// count-method accessions, subset-sampling estimates for weighed
    /// ones.
    pub seeds_remaining: u64,
    /// Active accessions whose seed count cannot be estimated.
    pub inestimable_accessions: usize,
}

#[derive(Debug, Default)]
struct IdCounters {
    accession: i64,
    withdrawal: i64,
    viability_test: i64,
    state_history: i64,
    quantity_history: i64,
}

/// The orchestrating store behind every public accession operation.
pub struct AccessionStore {
    records: HashMap<AccessionId, AccessionRecord>,
    users: HashMap<UserId, UserProfile>,
    directory: FacilityDirectory,
    gate: Box<dyn AuthorizationGate>,
    allocator: Box<dyn AccessionNumberAllocator>,
    deliveries: Box<dyn DeliveryLookup>,
    publisher: Box<dyn EventPublisher>,
    counters: IdCounters,
}

impl AccessionStore {
    /// Creates a store with the given collaborators and an empty
    /// repository.
    #[must_use]
    pub fn new(
        directory: FacilityDirectory,
        gate: Box<dyn AuthorizationGate>,
        allocator: Box<dyn AccessionNumberAllocator>,
        deliveries: Box<dyn DeliveryLookup>,
        publisher: Box<dyn EventPublisher>,
    ) -> Self {
        Self {
            records: HashMap::new(),
            users: HashMap::new(),
            directory,
            gate,
            allocator,
            deliveries,
            publisher,
            counters: IdCounters::default(),
        }
    }

    /// Registers a user profile for history display names.
    pub fn register_user(&mut self, user_id: UserId, profile: UserProfile) {
        self.users.insert(user_id, profile);
    }

    /// Creates a new accession.
    ///
    /// The store allocates the accession number (retrying a bounded number
    /// of times on collision), runs the desired model through the engine,
    /// and writes the initial "Accession created" state-history row.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AccessDenied`],
    /// [`StoreError::FacilityNotFound`],
    /// [`StoreError::FacilityTypeMismatch`] (nursery facilities hold no
    /// accessions), [`StoreError::SubLocationUnknown`],
    /// [`StoreError::DuplicateAccessionNumber`], or a wrapped validation
    /// error from the engine.
    pub fn create(
        &mut self,
        clock: &dyn Clock,
        principal: &Principal,
        new_accession: Accession,
    ) -> Result<Accession, StoreError> {
        let facility_id = new_accession.facility_id;
        self.authorize(principal, AccessionOperation::Create, facility_id)?;

        let info = self.facility(facility_id)?;
        if info.facility_type == FacilityType::Nursery {
            return Err(StoreError::FacilityTypeMismatch);
        }
        validate_sub_location(info, &new_accession)?;

        let now = clock.now();
        let mut baseline = Accession::new(facility_id, principal.user_id, now);
        baseline.is_manual_state = new_accession.is_manual_state;

        let mut desired = new_accession;
        desired.id = None;
        desired.accession_number = None;
        desired.created_by = principal.user_id;
        desired.created_time = now;
        desired.checked_in_time = None;

        let outcome = reconcile(&baseline, &desired, now)?;
        let number = self.allocate_number(facility_id, clock)?;

        let accession_id = self.next_accession_id();
        let mut accession = outcome.accession;
        accession.id = Some(accession_id);
        accession.accession_number = Some(number);
        self.assign_child_ids(&mut accession);

        let state_history = vec![StateHistoryEntry {
            id: Some(self.next_state_history_id()),
            old_state: None,
            new_state: accession.state,
            reason: REASON_CREATED.to_string(),
            updated_by: principal.user_id,
            updated_time: now,
        }];
        let mut quantity_history = Vec::new();
        if let Some(record) = outcome.quantity_record {
            quantity_history.push(QuantityHistoryEntry {
                id: Some(self.next_quantity_history_id()),
                history_type: record.history_type,
                remaining: record.remaining,
                created_by: principal.user_id,
                created_time: now,
            });
        }

        info!(
            accession = accession_id.value(),
            number = accession.accession_number.as_deref().unwrap_or(""),
            facility = facility_id.value(),
            "created accession"
        );

        self.records.insert(
            accession_id,
            AccessionRecord {
                accession: accession.clone(),
                state_history,
                quantity_history,
            },
        );
        Ok(accession)
    }

    /// Checks an accession in.
    ///
    /// Idempotent: the first call moves `AwaitingCheckIn` to
    /// `AwaitingProcessing` and records the check-in time truncated to
    /// whole seconds; later calls change nothing.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AccessionNotFound`] or
    /// [`StoreError::AccessDenied`].
    pub fn check_in(
        &mut self,
        clock: &dyn Clock,
        principal: &Principal,
        id: AccessionId,
    ) -> Result<Accession, StoreError> {
        let Some(record) = self.records.get(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        let facility_id = record.accession.facility_id;
        let current_state = record.accession.state;
        self.authorize(principal, AccessionOperation::Update, facility_id)?;

        let Some(transition) = check_in_transition(current_state) else {
            debug!(accession = id.value(), "already checked in; no-op");
            return self.fetch_accession(id);
        };

        let now = clock.now();
        let row_id = self.next_state_history_id();
        let Some(record) = self.records.get_mut(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        record.accession.state = transition.new_state;
        record.accession.checked_in_time = Some(truncate_to_seconds(now));
        record.state_history.push(StateHistoryEntry {
            id: Some(row_id),
            old_state: Some(current_state),
            new_state: transition.new_state,
            reason: transition.reason.to_string(),
            updated_by: principal.user_id,
            updated_time: now,
        });
        info!(accession = id.value(), "checked in");
        Ok(record.accession.clone())
    }

    /// Applies `mutator` to the accession and persists the reconciled
    /// result atomically.
    ///
    /// Identity fields (id, number, facility, creation, check-in time) are
    /// forced back to their persisted values before reconciliation; a
    /// species change publishes a [`SpeciesChangedEvent`] unless nursery
    /// deliveries block it.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AccessionNotFound`],
    /// [`StoreError::AccessDenied`], [`StoreError::SubLocationUnknown`],
    /// [`StoreError::SpeciesHasDeliveries`], or a wrapped validation error
    /// from the engine.
    pub fn update(
        &mut self,
        clock: &dyn Clock,
        principal: &Principal,
        id: AccessionId,
        mutator: impl FnOnce(Accession) -> Accession,
    ) -> Result<Accession, StoreError> {
        let (existing, desired) = self.prepare_update(principal, id, mutator)?;

        let now = clock.now();
        let outcome = reconcile(&existing, &desired, now)?;
        self.commit(principal, id, &existing, outcome, now)
    }

    /// Runs the same computation as [`Self::update`] without persisting
    /// anything: no ids are assigned, no history appended, no events
    /// published.
    ///
    /// # Errors
    ///
    /// Fails exactly as [`Self::update`] does.
    pub fn dry_run(
        &self,
        clock: &dyn Clock,
        principal: &Principal,
        id: AccessionId,
        mutator: impl FnOnce(Accession) -> Accession,
    ) -> Result<Accession, StoreError> {
        let (existing, desired) = self.prepare_update(principal, id, mutator)?;

        let outcome = reconcile(&existing, &desired, clock.now())?;
        debug!(accession = id.value(), "dry run evaluated");
        Ok(outcome.accession)
    }

    /// Deletes an accession.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AccessionNotFound`],
    /// [`StoreError::AccessDenied`], or
    /// [`StoreError::AccessionHasDeliveries`] while nursery deliveries
    /// still reference the accession.
    pub fn delete(&mut self, principal: &Principal, id: AccessionId) -> Result<(), StoreError> {
        let Some(record) = self.records.get(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        self.authorize(
            principal,
            AccessionOperation::Delete,
            record.accession.facility_id,
        )?;
        if self.deliveries.has_deliveries(id) {
            return Err(StoreError::AccessionHasDeliveries);
        }
        self.records.remove(&id);
        info!(accession = id.value(), "deleted accession");
        Ok(())
    }

    /// Fetches one accession.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AccessionNotFound`] or
    /// [`StoreError::AccessDenied`].
    pub fn fetch_one_by_id(
        &self,
        principal: &Principal,
        id: AccessionId,
    ) -> Result<Accession, StoreError> {
        let Some(record) = self.records.get(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        self.authorize(
            principal,
            AccessionOperation::Read,
            record.accession.facility_id,
        )?;
        Ok(record.accession.clone())
    }

    /// Builds the reverse-chronological timeline for one accession.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::AccessionNotFound`] or
    /// [`StoreError::AccessDenied`].
    pub fn fetch_history(
        &self,
        principal: &Principal,
        id: AccessionId,
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        let Some(record) = self.records.get(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        self.authorize(
            principal,
            AccessionOperation::Read,
            record.accession.facility_id,
        )?;
        Ok(build_history(
            &record.accession,
            &record.state_history,
            &record.quantity_history,
            &self.users,
        ))
    }

    /// Counts the accessions in scope, per lifecycle state.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::FacilityNotFound`],
    /// [`StoreError::AccessionNotFound`], or [`StoreError::AccessDenied`]
    /// when the scope is unreadable.
    pub fn count_by_state(
        &self,
        principal: &Principal,
        scope: &SummaryScope,
    ) -> Result<BTreeMap<AccessionState, usize>, StoreError> {
        let mut counts: BTreeMap<AccessionState, usize> = BTreeMap::new();
        for record in self.scope_records(principal, scope)? {
            *counts.entry(record.accession.state).or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Computes aggregate numbers for the accessions in scope.
    ///
    /// # Errors
    ///
    /// Fails exactly as [`Self::count_by_state`] does.
    pub fn summary_statistics(
        &self,
        principal: &Principal,
        scope: &SummaryScope,
    ) -> Result<SummaryStatistics, StoreError> {
        let mut stats = SummaryStatistics::default();
        for record in self.scope_records(principal, scope)? {
            stats.accessions += 1;
            if !record.accession.state.is_active() {
                continue;
            }
            stats.active_accessions += 1;
            match remaining_seed_count(&record.accession) {
                Some(seeds) => stats.seeds_remaining += u64::from(seeds),
                None => stats.inestimable_accessions += 1,
            }
        }
        Ok(stats)
    }

    // ==== internals ====

    fn authorize(
        &self,
        principal: &Principal,
        operation: AccessionOperation,
        facility_id: FacilityId,
    ) -> Result<(), StoreError> {
        match self.gate.authorize(principal, operation, facility_id) {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny => {
                warn!(
                    user = principal.user_id.value(),
                    operation = ?operation,
                    facility = facility_id.value(),
                    "operation denied"
                );
                Err(StoreError::AccessDenied)
            }
        }
    }

    fn facility(&self, facility_id: FacilityId) -> Result<&FacilityInfo, StoreError> {
        self.directory
            .get(facility_id)
            .ok_or(StoreError::FacilityNotFound(facility_id))
    }

    fn fetch_accession(&self, id: AccessionId) -> Result<Accession, StoreError> {
        self.records
            .get(&id)
            .map(|record| record.accession.clone())
            .ok_or(StoreError::AccessionNotFound(id))
    }

    /// Shared head of `update` and `dry_run`: authorization, identity
    /// forcing, sub-location and delivery checks.
    fn prepare_update(
        &self,
        principal: &Principal,
        id: AccessionId,
        mutator: impl FnOnce(Accession) -> Accession,
    ) -> Result<(Accession, Accession), StoreError> {
        let Some(record) = self.records.get(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        let existing = record.accession.clone();
        self.authorize(principal, AccessionOperation::Update, existing.facility_id)?;

        let mut desired = mutator(existing.clone());
        desired.id = existing.id;
        desired.accession_number = existing.accession_number.clone();
        desired.facility_id = existing.facility_id;
        desired.created_by = existing.created_by;
        desired.created_time = existing.created_time;
        desired.checked_in_time = existing.checked_in_time;

        let info = self.facility(desired.facility_id)?;
        validate_sub_location(info, &desired)?;

        if desired.species_id != existing.species_id && self.deliveries.has_deliveries(id) {
            return Err(StoreError::SpeciesHasDeliveries);
        }

        Ok((existing, desired))
    }

    /// Applies a reconcile outcome to the repository. Everything fallible
    /// has already happened; this step only writes.
    ///
    /// The outcome's `withdrawal_diff` and `viability_test_diff` are not
    /// consumed here: the in-memory repository replaces the record
    /// wholesale. The diffs exist for persistence layers that write child
    /// rows individually.
    fn commit(
        &mut self,
        principal: &Principal,
        id: AccessionId,
        existing: &Accession,
        outcome: ReconcileOutcome,
        now: OffsetDateTime,
    ) -> Result<Accession, StoreError> {
        let mut accession = outcome.accession;
        self.assign_child_ids(&mut accession);

        let state_row = outcome.state_transition.map(|transition| StateHistoryEntry {
            id: Some(self.next_state_history_id()),
            old_state: Some(existing.state),
            new_state: transition.new_state,
            reason: transition.reason.to_string(),
            updated_by: principal.user_id,
            updated_time: now,
        });
        let quantity_row = outcome.quantity_record.map(|record| QuantityHistoryEntry {
            id: Some(self.next_quantity_history_id()),
            history_type: record.history_type,
            remaining: record.remaining,
            created_by: principal.user_id,
            created_time: now,
        });
        let species_event = (accession.species_id != existing.species_id
            && accession.species_id.is_some())
        .then_some(SpeciesChangedEvent {
            accession_id: id,
            old_species_id: existing.species_id,
            new_species_id: accession.species_id,
        });

        let Some(record) = self.records.get_mut(&id) else {
            return Err(StoreError::AccessionNotFound(id));
        };
        record.accession = accession.clone();
        if let Some(row) = state_row {
            info!(
                accession = id.value(),
                from = existing.state.as_str(),
                to = row.new_state.as_str(),
                reason = row.reason.as_str(),
                "state changed"
            );
            record.state_history.push(row);
        }
        if let Some(row) = quantity_row {
            record.quantity_history.push(row);
        }

        if let Some(event) = species_event {
            self.publisher.publish_species_changed(event);
        }
        info!(accession = id.value(), "updated accession");
        Ok(accession)
    }

    fn allocate_number(
        &mut self,
        facility_id: FacilityId,
        clock: &dyn Clock,
    ) -> Result<String, StoreError> {
        for _ in 0..NUMBER_ALLOCATION_ATTEMPTS {
            let candidate = self.allocator.allocate(facility_id, clock.today());
            if self.number_taken(facility_id, &candidate) {
                debug!(
                    facility = facility_id.value(),
                    number = candidate,
                    "accession number collision; retrying"
                );
                continue;
            }
            return Ok(candidate);
        }
        warn!(
            facility = facility_id.value(),
            attempts = NUMBER_ALLOCATION_ATTEMPTS,
            "accession number allocation exhausted"
        );
        Err(StoreError::DuplicateAccessionNumber {
            attempts: NUMBER_ALLOCATION_ATTEMPTS,
        })
    }

    fn number_taken(&self, facility_id: FacilityId, candidate: &str) -> bool {
        self.records.values().any(|record| {
            record.accession.facility_id == facility_id
                && record.accession.accession_number.as_deref() == Some(candidate)
        })
    }

    /// Assigns ids to new children and links the tracker-minted
    /// withdrawals of new viability tests, which arrive unlinked and in
    /// test order.
    fn assign_child_ids(&mut self, accession: &mut Accession) {
        let mut new_test_ids: Vec<ViabilityTestId> = Vec::new();
        for test in &mut accession.viability_tests {
            if test.id.is_none() {
                let id = self.next_viability_test_id();
                test.id = Some(id);
                if test.seeds_tested.is_some() {
                    new_test_ids.push(id);
                }
            }
        }

        let mut pending = new_test_ids.into_iter();
        for withdrawal in &mut accession.withdrawals {
            if withdrawal.purpose == WithdrawalPurpose::ViabilityTesting
                && withdrawal.viability_test_id.is_none()
            {
                withdrawal.viability_test_id = pending.next();
            }
        }

        for withdrawal in &mut accession.withdrawals {
            if withdrawal.id.is_none() {
                withdrawal.id = Some(self.next_withdrawal_id());
            }
        }
    }

    fn scope_records(
        &self,
        principal: &Principal,
        scope: &SummaryScope,
    ) -> Result<Vec<&AccessionRecord>, StoreError> {
        match scope {
            SummaryScope::Facility(facility_id) => {
                self.facility(*facility_id)?;
                self.authorize(principal, AccessionOperation::Read, *facility_id)?;
                Ok(self
                    .records
                    .values()
                    .filter(|record| record.accession.facility_id == *facility_id)
                    .collect())
            }
            SummaryScope::Organization(organization_id) => {
                let mut records = Vec::new();
                for facility_id in self.directory.facilities_of(*organization_id) {
                    self.authorize(principal, AccessionOperation::Read, facility_id)?;
                    records.extend(
                        self.records
                            .values()
                            .filter(|record| record.accession.facility_id == facility_id),
                    );
                }
                Ok(records)
            }
            SummaryScope::Accessions(ids) => {
                let mut records = Vec::new();
                for id in ids {
                    let Some(record) = self.records.get(id) else {
                        return Err(StoreError::AccessionNotFound(*id));
                    };
                    self.authorize(
                        principal,
                        AccessionOperation::Read,
                        record.accession.facility_id,
                    )?;
                    records.push(record);
                }
                Ok(records)
            }
        }
    }

    fn next_accession_id(&mut self) -> AccessionId {
        self.counters.accession += 1;
        AccessionId::new(self.counters.accession)
    }

    fn next_withdrawal_id(&mut self) -> WithdrawalId {
        self.counters.withdrawal += 1;
        WithdrawalId::new(self.counters.withdrawal)
    }

    fn next_viability_test_id(&mut self) -> ViabilityTestId {
        self.counters.viability_test += 1;
        ViabilityTestId::new(self.counters.viability_test)
    }

    fn next_state_history_id(&mut self) -> StateHistoryId {
        self.counters.state_history += 1;
        StateHistoryId::new(self.counters.state_history)
    }

    fn next_quantity_history_id(&mut self) -> QuantityHistoryId {
        self.counters.quantity_history += 1;
        QuantityHistoryId::new(self.counters.quantity_history)
    }
}

fn validate_sub_location(info: &FacilityInfo, accession: &Accession) -> Result<(), StoreError> {
    if let Some(sub_location) = &accession.sub_location
        && !info.sub_locations.contains(sub_location)
    {
        return Err(StoreError::SubLocationUnknown(sub_location.clone()));
    }
    Ok(())
}

/// Seeds still held by one accession: the exact count for count-method
/// accessions, a subset-sampling estimate of the remaining weight for
/// weighed ones. Distinct from the accession's `estimated_seed_count`,
/// which is derived from the processed total.
fn remaining_seed_count(accession: &Accession) -> Option<u32> {
    estimate_seed_count(
        accession.remaining.as_ref(),
        accession.subset_count,
        accession.subset_weight.as_ref(),
    )
    .ok()
    .flatten()
}

fn truncate_to_seconds(time: OffsetDateTime) -> OffsetDateTime {
    time.replace_nanosecond(0).unwrap_or(time)
}
