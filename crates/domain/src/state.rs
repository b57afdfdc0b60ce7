// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Accession lifecycle states and processing methods.

use crate::error::DomainError;
use crate::quantity::{SeedQuantityUnits, UnitFamily};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How an accession's quantity is tracked: by discrete count or by weight.
///
/// Immutable once any quantity-bearing child record (a withdrawal or a
/// viability test) exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessingMethod {
    /// Quantities are discrete seed counts.
    Count,
    /// Quantities are weight measurements.
    Weight,
}

impl ProcessingMethod {
    /// Returns whether `units` is a legal quantity unit for this method.
    ///
    /// `Count` accessions accept only `Seeds`; `Weight` accessions accept
    /// any weight unit.
    #[must_use]
    pub const fn accepts(self, units: SeedQuantityUnits) -> bool {
        match self {
            Self::Count => matches!(units, SeedQuantityUnits::Seeds),
            Self::Weight => units.is_weight(),
        }
    }

    /// Returns the unit family this method tracks quantities in.
    #[must_use]
    pub const fn family(self) -> UnitFamily {
        match self {
            Self::Count => UnitFamily::Count,
            Self::Weight => UnitFamily::Weight,
        }
    }

    /// Converts this method to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Weight => "Weight",
        }
    }
}

impl FromStr for ProcessingMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Count" => Ok(Self::Count),
            "Weight" => Ok(Self::Weight),
            _ => Err(DomainError::InvalidProcessingMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for ProcessingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lifecycle state of an accession.
///
/// States are conceptually ordered but not strictly linear:
/// `AwaitingCheckIn` → `AwaitingProcessing` → `Processing` → `Drying` →
/// `InStorage` → `UsedUp`. `Processed` and `Dried` are legacy values
/// retained for accessions recorded before the lifecycle was simplified;
/// they can still be read but can no longer be assigned.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum AccessionState {
    /// Initial state: the lot has been received but not checked in.
    #[default]
    AwaitingCheckIn,
    /// Checked in, waiting to be processed into a measurable quantity.
    AwaitingProcessing,
    /// Being processed; a total quantity has been entered.
    Processing,
    /// Legacy state: processing finished (no longer assignable).
    Processed,
    /// Drying before storage.
    Drying,
    /// Legacy state: drying finished (no longer assignable).
    Dried,
    /// Stored in the seed bank.
    InStorage,
    /// Terminal state: remaining quantity has reached exactly zero.
    /// No ordinary edit may revert it.
    UsedUp,
}

impl AccessionState {
    /// Returns whether the accession still holds seeds.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::UsedUp)
    }

    /// Returns whether this is a legacy value kept only for backward
    /// compatibility.
    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Processed | Self::Dried)
    }

    /// Returns whether a manual-state accession may be set to this value
    /// directly.
    ///
    /// Legacy states cannot be assigned, and `UsedUp` can only ever be
    /// produced by the automatic zero-quantity rule.
    #[must_use]
    pub const fn allows_manual_assignment(self) -> bool {
        !self.is_legacy() && !matches!(self, Self::UsedUp)
    }

    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingCheckIn => "AwaitingCheckIn",
            Self::AwaitingProcessing => "AwaitingProcessing",
            Self::Processing => "Processing",
            Self::Processed => "Processed",
            Self::Drying => "Drying",
            Self::Dried => "Dried",
            Self::InStorage => "InStorage",
            Self::UsedUp => "UsedUp",
        }
    }

    /// Returns the human-readable form used in timeline text.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AwaitingCheckIn => "Awaiting Check-In",
            Self::AwaitingProcessing => "Awaiting Processing",
            Self::Processing => "Processing",
            Self::Processed => "Processed",
            Self::Drying => "Drying",
            Self::Dried => "Dried",
            Self::InStorage => "In Storage",
            Self::UsedUp => "Used Up",
        }
    }

    /// Returns every state value.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::AwaitingCheckIn,
            Self::AwaitingProcessing,
            Self::Processing,
            Self::Processed,
            Self::Drying,
            Self::Dried,
            Self::InStorage,
            Self::UsedUp,
        ]
    }
}

impl FromStr for AccessionState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AwaitingCheckIn" => Ok(Self::AwaitingCheckIn),
            "AwaitingProcessing" => Ok(Self::AwaitingProcessing),
            "Processing" => Ok(Self::Processing),
            "Processed" => Ok(Self::Processed),
            "Drying" => Ok(Self::Drying),
            "Dried" => Ok(Self::Dried),
            "InStorage" => Ok(Self::InStorage),
            "UsedUp" => Ok(Self::UsedUp),
            _ => Err(DomainError::InvalidState(s.to_string())),
        }
    }
}

impl std::fmt::Display for AccessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
