// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Injected external collaborators.
//!
//! Accession-number allocation, nursery-delivery lookups, and domain-event
//! publication all live outside the store. Each is a small trait with a
//! default in-memory implementation.

use seed_bank_domain::{AccessionId, FacilityId, SpeciesId};
use std::collections::HashMap;
use time::Date;

/// Allocates facility-scoped display numbers for new accessions.
///
/// The allocator only promises a candidate; the store checks uniqueness
/// and retries a bounded number of times on collision.
pub trait AccessionNumberAllocator {
    /// Returns the next candidate accession number for `facility_id`.
    fn allocate(&mut self, facility_id: FacilityId, today: Date) -> String;
}

/// A date-scoped sequence: `YY-F-NNN` per facility per day.
#[derive(Debug, Default)]
pub struct SequentialAllocator {
    counters: HashMap<(FacilityId, Date), u32>,
}

impl SequentialAllocator {
    /// Creates an allocator with all sequences at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccessionNumberAllocator for SequentialAllocator {
    fn allocate(&mut self, facility_id: FacilityId, today: Date) -> String {
        let counter = self.counters.entry((facility_id, today)).or_insert(0);
        *counter += 1;
        format!(
            "{:02}-{}-{:03}",
            today.year() % 100,
            facility_id.value(),
            counter
        )
    }
}

/// Knows which accessions have nursery deliveries referencing them.
///
/// Deliveries block deletion and species reassignment; the store never
/// sees the deliveries themselves.
pub trait DeliveryLookup {
    /// Returns whether any delivery references `accession_id`.
    fn has_deliveries(&self, accession_id: AccessionId) -> bool;
}

/// A lookup that knows of no deliveries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDeliveries;

impl DeliveryLookup for NoDeliveries {
    fn has_deliveries(&self, _accession_id: AccessionId) -> bool {
        false
    }
}

/// Published when an update changes an accession's species.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesChangedEvent {
    /// The accession whose species changed.
    pub accession_id: AccessionId,
    /// The species before the update.
    pub old_species_id: Option<SpeciesId>,
    /// The species after the update.
    pub new_species_id: Option<SpeciesId>,
}

/// Delivers domain events to whoever listens.
pub trait EventPublisher {
    /// Publishes a species-change event.
    fn publish_species_changed(&mut self, event: SpeciesChangedEvent);
}

/// A publisher that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPublisher;

impl EventPublisher for NullPublisher {
    fn publish_species_changed(&mut self, _event: SpeciesChangedEvent) {}
}
