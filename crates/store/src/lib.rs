// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The accession store: the orchestrating boundary of the Seed Bank
//! Accession System.
//!
//! The store composes the pure reconciliation engine with the injected
//! external collaborators (authorization, accession-number allocation,
//! delivery lookups, event publication) and an in-memory repository that
//! models the transactional boundary: an operation either installs a fully
//! reconciled record or leaves the repository untouched.

mod clock;
mod collaborators;
mod directory;
mod error;
mod gates;
mod store;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collaborators::{
    AccessionNumberAllocator, DeliveryLookup, EventPublisher, NoDeliveries, NullPublisher,
    SequentialAllocator, SpeciesChangedEvent,
};
pub use directory::{FacilityDirectory, FacilityInfo, FacilityType};
pub use error::StoreError;
pub use gates::{AccessDecision, AccessionOperation, AllowAll, AuthorizationGate, Principal};
pub use store::{AccessionRecord, AccessionStore, SummaryScope, SummaryStatistics};
