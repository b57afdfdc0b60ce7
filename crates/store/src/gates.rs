// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The authorization gate.
//!
//! Every public store operation asks the gate first and performs no work
//! on denial. The gate is an opaque collaborator: the store neither knows
//! nor cares how the decision is made.

use seed_bank_domain::{FacilityId, UserId};

/// The acting user behind an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// The acting user's id.
    pub user_id: UserId,
}

impl Principal {
    /// Creates a principal for `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// The operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessionOperation {
    /// Creating a new accession.
    Create,
    /// Reading an accession or its history.
    Read,
    /// Editing an accession, including check-in.
    Update,
    /// Deleting an accession.
    Delete,
}

/// The gate's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// The operation may proceed.
    Allow,
    /// The operation must fail with no side effects.
    Deny,
}

/// Decides whether a principal may perform an operation at a facility.
pub trait AuthorizationGate {
    /// Returns the decision for `principal` performing `operation` against
    /// an accession held at `facility_id`.
    fn authorize(
        &self,
        principal: &Principal,
        operation: AccessionOperation,
        facility_id: FacilityId,
    ) -> AccessDecision;
}

/// A gate that allows everything. Useful for tests and single-tenant
/// deployments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthorizationGate for AllowAll {
    fn authorize(
        &self,
        _principal: &Principal,
        _operation: AccessionOperation,
        _facility_id: FacilityId,
    ) -> AccessDecision {
        AccessDecision::Allow
    }
}
