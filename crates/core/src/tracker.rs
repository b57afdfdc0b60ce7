// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The viability test tracker.
//!
//! Each viability test with a known `seeds_tested` owns exactly one
//! synthetic withdrawal in the accession's ledger. The tracker re-mints
//! those withdrawals from the desired tests on every reconciliation pass,
//! reusing the existing withdrawal's row identity so that editing a test
//! updates its withdrawal in place instead of replacing it. A test without
//! `seeds_tested` mints nothing, and removing a test removes exactly its
//! one withdrawal.

use crate::error::CoreError;
use seed_bank_domain::{Accession, DomainError, SeedQuantity, Withdrawal, WithdrawalPurpose};

/// Rejects desired viability tests whose ids belong to another accession.
///
/// # Errors
///
/// Returns [`DomainError::CrossAccessionReference`] wrapped in a
/// [`CoreError`] when a desired test carries an id that is not among the
/// existing accession's tests.
pub fn validate_references(existing: &Accession, desired: &Accession) -> Result<(), CoreError> {
    for test in &desired.viability_tests {
        if let Some(id) = test.id
            && existing.find_viability_test(id).is_none()
        {
            return Err(CoreError::DomainViolation(
                DomainError::CrossAccessionReference {
                    viability_test_id: id,
                },
            ));
        }
    }
    Ok(())
}

/// Mints the synthetic withdrawals reflecting the desired viability tests.
///
/// Row identity, recording user, and creation time are carried over from
/// the existing linked withdrawal when the test already had one. A new
/// test (no id yet) mints an unlinked withdrawal, emitted in test order;
/// the store links it once the test's id has been assigned.
#[must_use]
pub fn mint_test_withdrawals(existing: &Accession, desired: &Accession) -> Vec<Withdrawal> {
    desired
        .viability_tests
        .iter()
        .filter_map(|test| {
            let seeds_tested = test.seeds_tested?;
            let prior = test.id.and_then(|test_id| {
                existing
                    .withdrawals
                    .iter()
                    .find(|w| w.viability_test_id == Some(test_id))
            });

            Some(Withdrawal {
                id: prior.and_then(|w| w.id),
                date: test.start_date,
                purpose: WithdrawalPurpose::ViabilityTesting,
                withdrawn: SeedQuantity::seeds(seeds_tested),
                remaining: None,
                viability_test_id: test.id,
                withdrawn_by: prior.and_then(|w| w.withdrawn_by),
                staff_responsible: test.staff_responsible.clone(),
                created_time: prior.and_then(|w| w.created_time),
            })
        })
        .collect()
}
