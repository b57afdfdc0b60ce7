// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The reconciliation entry point.
//!
//! [`reconcile`] composes the tracker, the ledger, and the state machine
//! into one pure `(existing, desired) -> outcome` function. The outcome
//! carries the fully derived accession plus everything the caller needs to
//! persist it: the state transition (if one fired), the quantity-history
//! record (if the remaining quantity changed), and the structural child
//! diffs keyed by row id.

use crate::error::CoreError;
use crate::ledger;
use crate::state_machine::{self, StateTransition};
use crate::tracker;
use seed_bank_domain::{
    Accession, DomainError, ProcessingMethod, QuantityHistoryType, SeedQuantity, ViabilityTest,
    ViabilityTestId, Withdrawal, WithdrawalId, estimate_seed_count,
};
use time::OffsetDateTime;

/// A quantity-history row to append: the new remaining value and whether
/// it was observed by the caller or computed by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityRecord {
    /// Observed (caller-supplied) or computed (count subtraction).
    pub history_type: QuantityHistoryType,
    /// The new remaining quantity.
    pub remaining: SeedQuantity,
}

/// The structural withdrawal changes, keyed by row id.
///
/// A three-way diff against the persisted set: rows keep their primary key
/// identity across edits instead of being deleted and reinserted.
#[derive(Debug, Clone, Default)]
pub struct WithdrawalDiff {
    /// Rows with no id yet; the store assigns ids when applying.
    pub inserts: Vec<Withdrawal>,
    /// Persisted rows whose fields changed.
    pub updates: Vec<Withdrawal>,
    /// Persisted ids absent from the desired set.
    pub deletes: Vec<WithdrawalId>,
}

/// The structural viability-test changes, keyed by row id.
#[derive(Debug, Clone, Default)]
pub struct ViabilityTestDiff {
    /// Tests not present in the persisted set.
    pub inserts: Vec<ViabilityTest>,
    /// Persisted tests whose fields changed.
    pub updates: Vec<ViabilityTest>,
    /// Persisted ids absent from the desired set.
    pub deletes: Vec<ViabilityTestId>,
}

/// Everything an update produces, computed without touching storage.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    /// The fully derived accession (remaining, estimated count, state).
    pub accession: Accession,
    /// The state transition that fired, if any.
    pub state_transition: Option<StateTransition>,
    /// The quantity-history row to append, if the remaining changed.
    pub quantity_record: Option<QuantityRecord>,
    /// Withdrawal inserts, updates, and deletes.
    pub withdrawal_diff: WithdrawalDiff,
    /// Viability-test inserts, updates, and deletes.
    pub viability_test_diff: ViabilityTestDiff,
}

/// Reconciles a desired accession against its persisted form.
///
/// New children keep `id = None`; the store assigns ids when applying the
/// outcome. A new viability test's minted withdrawal is likewise emitted
/// unlinked (in test order) and is linked by the store once the test's id
/// exists. Newly inserted children are stamped with `now` as their
/// creation time.
///
/// # Arguments
///
/// * `existing` - The persisted accession (or the creation baseline)
/// * `desired` - The caller's edited copy
/// * `now` - The transaction timestamp for new child rows
///
/// # Errors
///
/// Returns a [`CoreError`] wrapping the violated domain rule; see
/// [`crate::ledger`], [`crate::tracker`], and [`crate::state_machine`] for
/// the individual rules. Additionally returns
/// [`DomainError::ProcessingMethodImmutable`] when the processing method
/// changes while quantity-bearing children exist.
pub fn reconcile(
    existing: &Accession,
    desired: &Accession,
    now: OffsetDateTime,
) -> Result<ReconcileOutcome, CoreError> {
    let mut desired = desired.clone();

    // Fixed at creation; silently keep the persisted value.
    desired.is_manual_state = existing.is_manual_state;

    if existing.has_quantity_bearing_children()
        && desired.processing_method != existing.processing_method
    {
        return Err(CoreError::DomainViolation(
            DomainError::ProcessingMethodImmutable,
        ));
    }

    desired.validate()?;
    tracker::validate_references(existing, &desired)?;
    ledger::validate_withdrawals(existing, &desired)?;

    // System-owned rows are reflections of the viability tests: drop
    // whatever the caller passed through and re-mint from the tests.
    let minted = tracker::mint_test_withdrawals(existing, &desired);
    desired.withdrawals.retain(|w| !w.is_system_owned());
    desired.withdrawals.extend(minted);

    desired.remaining = match (&desired.total, desired.processing_method) {
        (Some(total), Some(method)) => {
            let outcome =
                ledger::recompute(method, total, std::mem::take(&mut desired.withdrawals))?;
            desired.withdrawals = outcome.withdrawals;
            Some(outcome.remaining)
        }
        _ => None,
    };

    // The estimate is a property of the processed total, not the current
    // remaining: withdrawals do not shrink it.
    desired.estimated_seed_count = estimate_seed_count(
        desired.total.as_ref(),
        desired.subset_count,
        desired.subset_weight.as_ref(),
    )?;

    let state_transition =
        state_machine::derive_transition(existing, &desired, desired.remaining.as_ref())?;
    desired.state = state_transition
        .as_ref()
        .map_or(existing.state, |t| t.new_state);

    let quantity_record = quantity_record(existing, &desired);

    for withdrawal in &mut desired.withdrawals {
        if withdrawal.created_time.is_none() {
            withdrawal.created_time = Some(now);
        }
    }
    for test in &mut desired.viability_tests {
        if test.created_time.is_none() {
            test.created_time = Some(now);
        }
    }

    let withdrawal_diff = diff_withdrawals(existing, &desired);
    let viability_test_diff = diff_viability_tests(existing, &desired);

    Ok(ReconcileOutcome {
        accession: desired,
        state_transition,
        quantity_record,
        withdrawal_diff,
        viability_test_diff,
    })
}

/// A quantity row is appended iff the remaining quantity actually changed
/// value. Weight readings and a freshly entered total are observations;
/// a count-method remaining derived through subtraction is computed.
fn quantity_record(existing: &Accession, desired: &Accession) -> Option<QuantityRecord> {
    let remaining = desired.remaining.as_ref()?;
    if existing.remaining.as_ref() == Some(remaining) {
        return None;
    }

    let history_type = if desired.withdrawals.is_empty() {
        QuantityHistoryType::Observed
    } else {
        match desired.processing_method {
            Some(ProcessingMethod::Count) => QuantityHistoryType::Computed,
            _ => QuantityHistoryType::Observed,
        }
    };

    Some(QuantityRecord {
        history_type,
        remaining: *remaining,
    })
}

fn diff_withdrawals(existing: &Accession, desired: &Accession) -> WithdrawalDiff {
    let mut diff = WithdrawalDiff::default();

    for withdrawal in &desired.withdrawals {
        match withdrawal.id {
            None => diff.inserts.push(withdrawal.clone()),
            Some(id) => match existing.find_withdrawal(id) {
                Some(prior) if prior == withdrawal => {}
                _ => diff.updates.push(withdrawal.clone()),
            },
        }
    }

    for prior in &existing.withdrawals {
        if let Some(id) = prior.id
            && desired.find_withdrawal(id).is_none()
        {
            diff.deletes.push(id);
        }
    }

    diff
}

fn diff_viability_tests(existing: &Accession, desired: &Accession) -> ViabilityTestDiff {
    let mut diff = ViabilityTestDiff::default();

    for test in &desired.viability_tests {
        match test.id.and_then(|id| existing.find_viability_test(id)) {
            None => diff.inserts.push(test.clone()),
            Some(prior) if prior == test => {}
            Some(_) => diff.updates.push(test.clone()),
        }
    }

    for prior in &existing.viability_tests {
        if let Some(id) = prior.id
            && desired.find_viability_test(id).is_none()
        {
            diff.deletes.push(id);
        }
    }

    diff
}
