// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed identifiers.
//!
//! Every entity carries its own id newtype so that a withdrawal id can never
//! be passed where a viability test id is expected. Identity is assigned by
//! the store; models that have not been persisted yet carry `None` in their
//! optional id field instead of a sentinel value.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifies one accession (seed lot).
    AccessionId
);
id_type!(
    /// Identifies a facility (seed bank or nursery site).
    FacilityId
);
id_type!(
    /// Identifies the organization a facility belongs to.
    OrganizationId
);
id_type!(
    /// Identifies a species in the taxonomy service.
    SpeciesId
);
id_type!(
    /// Identifies an acting or referenced user.
    UserId
);
id_type!(
    /// Identifies one withdrawal row of an accession.
    WithdrawalId
);
id_type!(
    /// Identifies one viability test of an accession.
    ViabilityTestId
);
id_type!(
    /// Identifies one quantity-history row.
    QuantityHistoryId
);
id_type!(
    /// Identifies one state-history row.
    StateHistoryId
);
