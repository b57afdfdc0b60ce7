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

//! The reconciliation engine for the Seed Bank Accession System.
//!
//! Everything here is pure: [`reconcile`] takes the persisted accession and
//! the caller's desired copy, and computes the fully derived result plus the
//! structural changes needed to get there. Nothing is read from or written
//! to storage, and "now" is always an explicit parameter.

mod error;
mod ledger;
mod reconcile;
mod state_machine;
mod tracker;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use reconcile::{
    QuantityRecord, ReconcileOutcome, ViabilityTestDiff, WithdrawalDiff, reconcile,
};
pub use state_machine::{
    REASON_CHECKED_IN, REASON_CREATED, REASON_EDITED, REASON_QUANTITY_ENTERED, REASON_USED_UP,
    StateTransition, check_in_transition,
};
