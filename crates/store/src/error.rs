// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use seed_bank::CoreError;
use seed_bank_domain::{AccessionId, FacilityId};
use thiserror::Error;

/// Errors surfaced by the store's public operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The authorization gate denied the operation.
    #[error("operation not permitted")]
    AccessDenied,

    /// No accession with the given id exists.
    #[error("accession {0} not found")]
    AccessionNotFound(AccessionId),

    /// The referenced facility is not in the directory.
    #[error("facility {0} not found")]
    FacilityNotFound(FacilityId),

    /// Accessions cannot be created at nursery-type facilities.
    #[error("accessions cannot be created at a nursery facility")]
    FacilityTypeMismatch,

    /// Accession-number allocation kept colliding.
    #[error("could not allocate a unique accession number after {attempts} attempts")]
    DuplicateAccessionNumber {
        /// How many candidates were tried.
        attempts: u32,
    },

    /// Species reassignment is blocked while nursery deliveries exist.
    #[error("species cannot change while nursery deliveries reference the accession")]
    SpeciesHasDeliveries,

    /// Deletion is blocked while nursery deliveries exist.
    #[error("accession cannot be deleted while nursery deliveries reference it")]
    AccessionHasDeliveries,

    /// The requested sub-location is not registered for the facility.
    #[error("unknown sub-location '{0}'")]
    SubLocationUnknown(String),

    /// The reconciliation engine rejected the desired state.
    #[error(transparent)]
    Validation(#[from] CoreError),
}
