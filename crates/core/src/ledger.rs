// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The withdrawal ledger.
//!
//! Given the processing method, the total, and the full desired set of
//! withdrawals (caller-supplied plus tracker-minted), the ledger validates
//! sourcing and unit rules and recomputes the accession's remaining
//! quantity. Count-method accessions subtract withdrawals from the total in
//! date order; weight-method accessions trust the caller's fresh scale
//! readings and take the smallest one.

use crate::error::CoreError;
use seed_bank_domain::{
    Accession, DomainError, ProcessingMethod, SeedQuantity, Withdrawal, WithdrawalPurpose,
};

/// The recomputed ledger: per-row remaining values plus the accession's
/// new remaining quantity.
#[derive(Debug, Clone)]
pub struct LedgerOutcome {
    /// The withdrawals, reordered and with per-row remaining filled in
    /// for count-method accessions.
    pub withdrawals: Vec<Withdrawal>,
    /// The accession's remaining quantity after all withdrawals.
    pub remaining: SeedQuantity,
}

/// Validates the caller-supplied withdrawal set against the persisted one.
///
/// Runs before the tracker replaces system-owned rows, so carried-over
/// system rows are still present and id-checkable here.
///
/// # Errors
///
/// Returns a [`CoreError`] wrapping:
/// - [`DomainError::WithdrawalNotFound`] for an id absent from the
///   persisted set
/// - [`DomainError::ImmutableLink`] when a withdrawal's viability test
///   link differs from the persisted one
/// - [`DomainError::ViabilityPurposeReserved`] for a caller-created
///   withdrawal with the viability-testing purpose
pub fn validate_withdrawals(existing: &Accession, desired: &Accession) -> Result<(), CoreError> {
    for withdrawal in &desired.withdrawals {
        match withdrawal.id {
            Some(id) => {
                let Some(prior) = existing.find_withdrawal(id) else {
                    return Err(CoreError::DomainViolation(DomainError::WithdrawalNotFound(
                        id,
                    )));
                };
                if withdrawal.viability_test_id != prior.viability_test_id {
                    return Err(CoreError::DomainViolation(DomainError::ImmutableLink {
                        withdrawal_id: id,
                    }));
                }
            }
            None => {
                if withdrawal.viability_test_id.is_some() {
                    return Err(CoreError::DomainViolation(
                        DomainError::ViabilityPurposeReserved,
                    ));
                }
            }
        }

        if withdrawal.viability_test_id.is_none()
            && withdrawal.purpose == WithdrawalPurpose::ViabilityTesting
        {
            return Err(CoreError::DomainViolation(
                DomainError::ViabilityPurposeReserved,
            ));
        }
    }
    Ok(())
}

/// Recomputes the remaining quantity from the full desired withdrawal set.
///
/// # Errors
///
/// Returns a [`CoreError`] wrapping:
/// - [`DomainError::IncompatibleUnits`] when a withdrawal's units do not
///   fit the processing method
/// - [`DomainError::RemainingQuantityRequired`] when a weight-method
///   withdrawal lacks its fresh scale reading
/// - [`DomainError::InsufficientQuantity`] when count subtraction would
///   go negative
pub fn recompute(
    method: ProcessingMethod,
    total: &SeedQuantity,
    withdrawals: Vec<Withdrawal>,
) -> Result<LedgerOutcome, CoreError> {
    // Tracker-minted rows are always seed counts and are exempt from the
    // method's unit rule; they carry no weight information. Validation has
    // already ensured the viability-testing purpose only appears on
    // tracker-minted rows, including freshly minted ones not yet linked to
    // a persisted test id.
    for withdrawal in withdrawals
        .iter()
        .filter(|w| w.purpose != WithdrawalPurpose::ViabilityTesting)
    {
        if !method.accepts(withdrawal.withdrawn.units()) {
            return Err(CoreError::DomainViolation(DomainError::IncompatibleUnits {
                have: withdrawal.withdrawn.units(),
                want: method.family(),
            }));
        }
    }

    match method {
        ProcessingMethod::Count => recompute_by_subtraction(total, withdrawals),
        ProcessingMethod::Weight => recompute_from_readings(total, withdrawals),
    }
}

/// Count method: remaining = total minus every withdrawal, applied in date
/// order (row id breaks date ties; unpersisted rows sort last).
fn recompute_by_subtraction(
    total: &SeedQuantity,
    mut withdrawals: Vec<Withdrawal>,
) -> Result<LedgerOutcome, CoreError> {
    withdrawals.sort_by_key(|w| (w.date, w.id.map_or(i64::MAX, |id| id.value())));

    let mut remaining = *total;
    for withdrawal in &mut withdrawals {
        remaining = remaining.checked_sub(&withdrawal.withdrawn)?;
        withdrawal.remaining = Some(remaining);
    }

    Ok(LedgerOutcome {
        withdrawals,
        remaining,
    })
}

/// Weight method: every non-system withdrawal must carry a fresh scale
/// reading, and the accession's remaining is the smallest reading. System
/// rows consume seeds, not measured weight, so they leave the remaining
/// weight untouched.
fn recompute_from_readings(
    total: &SeedQuantity,
    withdrawals: Vec<Withdrawal>,
) -> Result<LedgerOutcome, CoreError> {
    let mut remaining = *total;

    for withdrawal in withdrawals
        .iter()
        .filter(|w| w.purpose != WithdrawalPurpose::ViabilityTesting)
    {
        let Some(reading) = &withdrawal.remaining else {
            return Err(CoreError::DomainViolation(
                DomainError::RemainingQuantityRequired,
            ));
        };
        if !reading.is_compatible_with(total.units()) {
            return Err(CoreError::DomainViolation(DomainError::IncompatibleUnits {
                have: reading.units(),
                want: ProcessingMethod::Weight.family(),
            }));
        }
        let (Some(reading_grams), Some(remaining_grams)) = (reading.grams(), remaining.grams())
        else {
            // Unreachable: both are weight-family by the checks above.
            continue;
        };
        if reading_grams < remaining_grams {
            remaining = *reading;
        }
    }

    Ok(LedgerOutcome {
        withdrawals,
        remaining,
    })
}
