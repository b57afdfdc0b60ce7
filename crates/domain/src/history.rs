// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Append-only history rows.
//!
//! Every change to an accession's remaining quantity and every actual state
//! transition appends exactly one row. Rows are never mutated or deleted.

use crate::ids::{QuantityHistoryId, StateHistoryId, UserId};
use crate::quantity::SeedQuantity;
use crate::state::AccessionState;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// How a quantity-history value came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityHistoryType {
    /// The caller supplied the value directly (a fresh observation, such as
    /// a scale reading or an initial count).
    Observed,
    /// The engine derived the value (a count subtraction after a
    /// withdrawal).
    Computed,
}

/// One append-only record of the accession's remaining quantity changing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityHistoryEntry {
    /// Row identity; `None` until persisted.
    pub id: Option<QuantityHistoryId>,
    /// Whether the value was observed or computed.
    pub history_type: QuantityHistoryType,
    /// The new remaining quantity.
    pub remaining: SeedQuantity,
    /// The user whose operation produced the change.
    pub created_by: UserId,
    /// When the row was appended.
    pub created_time: OffsetDateTime,
}

/// One append-only record of an actual state transition.
///
/// No row is written for a requested-but-not-applied transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHistoryEntry {
    /// Row identity; `None` until persisted.
    pub id: Option<StateHistoryId>,
    /// The state before the transition; `None` for the creation row.
    pub old_state: Option<AccessionState>,
    /// The state after the transition.
    pub new_state: AccessionState,
    /// The fixed human-readable reason keyed by the transition trigger.
    pub reason: String,
    /// The user whose operation caused the transition.
    pub updated_by: UserId,
    /// When the transition happened.
    pub updated_time: OffsetDateTime,
}
