// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The accession aggregate root.

use crate::error::DomainError;
use crate::ids::{AccessionId, FacilityId, SpeciesId, UserId, ViabilityTestId, WithdrawalId};
use crate::quantity::SeedQuantity;
use crate::state::{AccessionState, ProcessingMethod};
use crate::viability::ViabilityTest;
use crate::withdrawal::Withdrawal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// One seed lot tracked from intake to exhaustion.
///
/// The accession owns its withdrawals and viability tests outright; they
/// are diffed and persisted as part of the accession, never independently.
/// `remaining` and `estimated_seed_count` are derived by the reconciliation
/// engine and overwritten on every update; callers cannot set them directly
/// (the initial observed value comes in through `total`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accession {
    /// Row identity; `None` until persisted.
    pub id: Option<AccessionId>,
    /// The facility-scoped display number; allocated by the store.
    pub accession_number: Option<String>,
    /// The seed bank facility holding this lot.
    pub facility_id: FacilityId,
    /// The species of the lot, when identified.
    pub species_id: Option<SpeciesId>,
    /// How quantities are tracked. Immutable once any withdrawal or
    /// viability test exists.
    pub processing_method: Option<ProcessingMethod>,
    /// The lifecycle state. Derived unless `is_manual_state` is set.
    pub state: AccessionState,
    /// Whether callers may set `state` directly. Fixed at creation.
    pub is_manual_state: bool,
    /// The originally processed amount; `None` before processing.
    pub total: Option<SeedQuantity>,
    /// The remaining amount; derived.
    pub remaining: Option<SeedQuantity>,
    /// The estimated seed count for weighed lots; derived.
    pub estimated_seed_count: Option<u32>,
    /// Number of seeds in the weighed subset sample.
    pub subset_count: Option<u32>,
    /// Weight of the subset sample.
    pub subset_weight: Option<SeedQuantity>,
    /// Storage sub-location within the facility.
    pub sub_location: Option<String>,
    /// Bag numbers the lot arrived in.
    pub bag_numbers: BTreeSet<String>,
    /// When the accession was checked in; `None` until `check_in`.
    pub checked_in_time: Option<OffsetDateTime>,
    /// The user who created the accession.
    pub created_by: UserId,
    /// When the accession was created.
    pub created_time: OffsetDateTime,
    /// Withdrawal events, including system-owned viability-test rows.
    pub withdrawals: Vec<Withdrawal>,
    /// Viability tests, each owning its results.
    pub viability_tests: Vec<ViabilityTest>,
}

impl Accession {
    /// Creates a new unpersisted accession in the initial state.
    #[must_use]
    pub const fn new(
        facility_id: FacilityId,
        created_by: UserId,
        created_time: OffsetDateTime,
    ) -> Self {
        Self {
            id: None,
            accession_number: None,
            facility_id,
            species_id: None,
            processing_method: None,
            state: AccessionState::AwaitingCheckIn,
            is_manual_state: false,
            total: None,
            remaining: None,
            estimated_seed_count: None,
            subset_count: None,
            subset_weight: None,
            sub_location: None,
            bag_numbers: BTreeSet::new(),
            checked_in_time: None,
            created_by,
            created_time,
            withdrawals: Vec::new(),
            viability_tests: Vec::new(),
        }
    }

    /// Returns whether any quantity-bearing child record exists.
    ///
    /// Once one does, the processing method is locked.
    #[must_use]
    pub fn has_quantity_bearing_children(&self) -> bool {
        !self.withdrawals.is_empty() || !self.viability_tests.is_empty()
    }

    /// Looks up a withdrawal by id.
    #[must_use]
    pub fn find_withdrawal(&self, id: WithdrawalId) -> Option<&Withdrawal> {
        self.withdrawals.iter().find(|w| w.id == Some(id))
    }

    /// Looks up a viability test by id.
    #[must_use]
    pub fn find_viability_test(&self, id: ViabilityTestId) -> Option<&ViabilityTest> {
        self.viability_tests.iter().find(|t| t.id == Some(id))
    }

    /// Validates the invariants that hold for any persisted accession.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a total is set without a processing method
    /// - the total's units do not fit the processing method
    /// - the total is not greater than zero
    /// - the subset weight is a seed count instead of a weight
    /// - quantity-bearing children exist without a total
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(total) = &self.total {
            let Some(method) = self.processing_method else {
                return Err(DomainError::ProcessingMethodNotSet);
            };
            if !method.accepts(total.units()) {
                return Err(DomainError::IncompatibleUnits {
                    have: total.units(),
                    want: method.family(),
                });
            }
            if total.is_zero() {
                return Err(DomainError::TotalNotPositive);
            }
        }

        if let Some(subset_weight) = &self.subset_weight
            && !subset_weight.units().is_weight()
        {
            return Err(DomainError::SubsetWeightNotWeight);
        }

        if self.total.is_none() && self.has_quantity_bearing_children() {
            return Err(DomainError::TotalNotSet);
        }

        Ok(())
    }
}
