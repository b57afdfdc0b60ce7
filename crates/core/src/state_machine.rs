// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lifecycle state derivation.
//!
//! State is never written directly. Each rule here produces at most one
//! [`StateTransition`], and every applied transition becomes exactly one
//! state-history row with a fixed reason string. A rule that does not fire
//! produces no row at all.

use crate::error::CoreError;
use seed_bank_domain::{Accession, AccessionState, DomainError, SeedQuantity};

/// Reason recorded for the initial state-history row of a new accession.
pub const REASON_CREATED: &str = "Accession created";
/// Reason recorded for the check-in transition.
pub const REASON_CHECKED_IN: &str = "Accession has been checked in";
/// Reason recorded when a manual-state caller sets the state directly.
pub const REASON_EDITED: &str = "Accession has been edited";
/// Reason recorded when entering a quantity first moves the state forward.
pub const REASON_QUANTITY_ENTERED: &str = "Seed count/weight has been entered";
/// Reason recorded when the remaining quantity reaches exactly zero.
pub const REASON_USED_UP: &str = "All seeds have been withdrawn";

/// One applied state change plus the reason string for its history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    /// The state the accession moves to.
    pub new_state: AccessionState,
    /// The fixed human-readable trigger description.
    pub reason: &'static str,
}

/// Returns the check-in transition, if the accession has not already been
/// checked in.
///
/// Check-in is idempotent: once past `AwaitingCheckIn` there is nothing to
/// do, and the caller must leave `checked_in_time` untouched.
#[must_use]
pub const fn check_in_transition(current: AccessionState) -> Option<StateTransition> {
    match current {
        AccessionState::AwaitingCheckIn => Some(StateTransition {
            new_state: AccessionState::AwaitingProcessing,
            reason: REASON_CHECKED_IN,
        }),
        _ => None,
    }
}

/// Derives the state transition (if any) produced by an update.
///
/// The zero-quantity rule always wins: when `new_remaining` is exactly zero
/// the state is forced to `UsedUp` no matter what the caller requested.
/// `UsedUp` itself is terminal for ordinary edits. Otherwise manual-state
/// accessions honor the caller's requested state (within the assignable
/// set), and automatic ones derive state purely from the data edit.
///
/// # Errors
///
/// Returns [`DomainError::InvalidManualState`] wrapped in a [`CoreError`]
/// when a manual-state caller requests a legacy state or `UsedUp`.
pub fn derive_transition(
    existing: &Accession,
    desired: &Accession,
    new_remaining: Option<&SeedQuantity>,
) -> Result<Option<StateTransition>, CoreError> {
    if let Some(remaining) = new_remaining
        && remaining.is_zero()
    {
        if existing.state == AccessionState::UsedUp {
            return Ok(None);
        }
        return Ok(Some(StateTransition {
            new_state: AccessionState::UsedUp,
            reason: REASON_USED_UP,
        }));
    }

    if existing.state == AccessionState::UsedUp {
        // Terminal: no ordinary edit reverts it.
        return Ok(None);
    }

    if existing.is_manual_state {
        return manual_transition(existing, desired.state);
    }

    // Automatic mode ignores direct state edits; entering the first
    // quantity is what moves a checked-in accession into processing.
    if existing.total.is_none()
        && desired.total.is_some()
        && existing.state == AccessionState::AwaitingProcessing
    {
        return Ok(Some(StateTransition {
            new_state: AccessionState::Processing,
            reason: REASON_QUANTITY_ENTERED,
        }));
    }

    Ok(None)
}

fn manual_transition(
    existing: &Accession,
    target: AccessionState,
) -> Result<Option<StateTransition>, CoreError> {
    if target == existing.state {
        return Ok(None);
    }

    // No-downgrade policy: reverting to the initial state is silently
    // ignored rather than rejected.
    if target == AccessionState::AwaitingCheckIn {
        return Ok(None);
    }

    if !target.allows_manual_assignment() {
        return Err(CoreError::DomainViolation(DomainError::InvalidManualState(
            target,
        )));
    }

    Ok(Some(StateTransition {
        new_state: target,
        reason: REASON_EDITED,
    }))
}
