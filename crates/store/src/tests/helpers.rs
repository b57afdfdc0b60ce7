// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for store tests.

use crate::clock::FixedClock;
use crate::collaborators::{
    AccessionNumberAllocator, DeliveryLookup, EventPublisher, NoDeliveries, NullPublisher,
    SequentialAllocator, SpeciesChangedEvent,
};
use crate::directory::{FacilityDirectory, FacilityInfo, FacilityType};
use crate::gates::{AccessDecision, AccessionOperation, AllowAll, AuthorizationGate, Principal};
use crate::store::AccessionStore;
use seed_bank_domain::{
    Accession, AccessionId, FacilityId, OrganizationId, ProcessingMethod, SeedQuantity, UserId,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;
use time::macros::datetime;
use time::{Date, OffsetDateTime};

pub const NOW: OffsetDateTime = datetime!(2026-04-01 12:00 UTC);
pub const CURATOR: Principal = Principal::new(UserId::new(7));
pub const SEED_BANK: FacilityId = FacilityId::new(1);
pub const NURSERY: FacilityId = FacilityId::new(2);
pub const ORGANIZATION: OrganizationId = OrganizationId::new(10);

/// A directory with one seed bank (two sub-locations) and one nursery,
/// both belonging to [`ORGANIZATION`].
pub fn directory() -> FacilityDirectory {
    let mut directory: FacilityDirectory = FacilityDirectory::new();
    directory.insert(
        SEED_BANK,
        FacilityInfo {
            facility_type: FacilityType::SeedBank,
            organization_id: ORGANIZATION,
            sub_locations: [String::from("Freezer A"), String::from("Shelf 3")]
                .into_iter()
                .collect(),
        },
    );
    directory.insert(
        NURSERY,
        FacilityInfo {
            facility_type: FacilityType::Nursery,
            organization_id: ORGANIZATION,
            sub_locations: BTreeSet::new(),
        },
    );
    directory
}

/// A store with the default collaborators: allow-everything gate,
/// sequential allocator, no deliveries, dropped events.
pub fn store() -> AccessionStore {
    AccessionStore::new(
        directory(),
        Box::new(AllowAll),
        Box::new(SequentialAllocator::new()),
        Box::new(NoDeliveries),
        Box::new(NullPublisher),
    )
}

/// An unpersisted accession draft for [`SEED_BANK`] with nothing measured
/// yet.
pub fn draft() -> Accession {
    Accession::new(SEED_BANK, CURATOR.user_id, NOW)
}

/// A draft already carrying a count-method total.
pub fn count_draft(total_seeds: u32) -> Accession {
    let mut accession: Accession = draft();
    accession.processing_method = Some(ProcessingMethod::Count);
    accession.total = Some(SeedQuantity::seeds(total_seeds));
    accession
}

pub fn clock() -> FixedClock {
    FixedClock::new(NOW)
}

/// A gate whose answer tests can flip mid-scenario.
pub struct ToggleGate {
    allow: Rc<Cell<bool>>,
}

impl ToggleGate {
    pub fn new() -> (Self, Rc<Cell<bool>>) {
        let allow: Rc<Cell<bool>> = Rc::new(Cell::new(true));
        (
            Self {
                allow: Rc::clone(&allow),
            },
            allow,
        )
    }
}

impl AuthorizationGate for ToggleGate {
    fn authorize(
        &self,
        _principal: &Principal,
        _operation: AccessionOperation,
        _facility_id: FacilityId,
    ) -> AccessDecision {
        if self.allow.get() {
            AccessDecision::Allow
        } else {
            AccessDecision::Deny
        }
    }
}

/// An allocator that proposes the same number every time.
pub struct ConstantAllocator(pub &'static str);

impl AccessionNumberAllocator for ConstantAllocator {
    fn allocate(&mut self, _facility_id: FacilityId, _today: Date) -> String {
        self.0.to_string()
    }
}

/// A delivery lookup backed by an explicit set of accession ids.
pub struct FixedDeliveries {
    accessions: Rc<RefCell<HashSet<AccessionId>>>,
}

impl FixedDeliveries {
    pub fn new() -> (Self, Rc<RefCell<HashSet<AccessionId>>>) {
        let accessions: Rc<RefCell<HashSet<AccessionId>>> = Rc::new(RefCell::new(HashSet::new()));
        (
            Self {
                accessions: Rc::clone(&accessions),
            },
            accessions,
        )
    }
}

impl DeliveryLookup for FixedDeliveries {
    fn has_deliveries(&self, accession_id: AccessionId) -> bool {
        self.accessions.borrow().contains(&accession_id)
    }
}

/// A publisher that records every event for inspection.
pub struct RecordingPublisher {
    events: Rc<RefCell<Vec<SpeciesChangedEvent>>>,
}

impl RecordingPublisher {
    pub fn new() -> (Self, Rc<RefCell<Vec<SpeciesChangedEvent>>>) {
        let events: Rc<RefCell<Vec<SpeciesChangedEvent>>> = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: Rc::clone(&events),
            },
            events,
        )
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish_species_changed(&mut self, event: SpeciesChangedEvent) {
        self.events.borrow_mut().push(event);
    }
}
