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

//! Domain types for the Seed Bank Accession System.
//!
//! An accession is one physical seed lot tracked from intake to exhaustion.
//! This crate holds the value types (quantities, units, lifecycle states),
//! the aggregate models (accessions, withdrawals, viability tests), the
//! append-only history row types, and the validation rules that hold
//! regardless of how the data is stored. Everything here is pure data:
//! no I/O, no clock, no ambient state.

mod accession;
mod error;
mod history;
mod ids;
mod quantity;
mod state;
mod viability;
mod withdrawal;

#[cfg(test)]
mod tests;

pub use accession::Accession;
pub use error::DomainError;
pub use history::{QuantityHistoryEntry, QuantityHistoryType, StateHistoryEntry};
pub use ids::{
    AccessionId, FacilityId, OrganizationId, QuantityHistoryId, SpeciesId, StateHistoryId, UserId,
    ViabilityTestId, WithdrawalId,
};
pub use quantity::{SeedQuantity, SeedQuantityUnits, UnitFamily, estimate_seed_count};
pub use state::{AccessionState, ProcessingMethod};
pub use viability::{TestResult, ViabilityTest, ViabilityTestType};
pub use withdrawal::{Withdrawal, WithdrawalPurpose};
