// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Withdrawals: quantities removed from an accession's remaining amount.

use crate::error::DomainError;
use crate::ids::{UserId, ViabilityTestId, WithdrawalId};
use crate::quantity::SeedQuantity;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The recorded purpose of a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WithdrawalPurpose {
    /// Seeds consumed by a viability (germination) test. Withdrawals with
    /// this purpose are system-owned: they exist only as reflections of a
    /// viability test and cannot be created or edited directly.
    ViabilityTesting,
    /// Seeds sent to a nursery for propagation.
    Nursery,
    /// Seeds planted out directly.
    Outplanting,
    /// Seeds used for outreach or education.
    OutreachOrEducation,
    /// Seeds used for research.
    Research,
    /// Seeds shared with another site.
    ShareWithAnotherSite,
    /// Any other purpose.
    Other,
}

impl WithdrawalPurpose {
    /// Converts this purpose to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViabilityTesting => "ViabilityTesting",
            Self::Nursery => "Nursery",
            Self::Outplanting => "Outplanting",
            Self::OutreachOrEducation => "OutreachOrEducation",
            Self::Research => "Research",
            Self::ShareWithAnotherSite => "ShareWithAnotherSite",
            Self::Other => "Other",
        }
    }

    /// Returns the lowercase phrase used in timeline text.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ViabilityTesting => "viability testing",
            Self::Nursery => "nursery",
            Self::Outplanting => "outplanting",
            Self::OutreachOrEducation => "outreach or education",
            Self::Research => "research",
            Self::ShareWithAnotherSite => "sharing with another site",
            Self::Other => "other",
        }
    }
}

impl FromStr for WithdrawalPurpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ViabilityTesting" => Ok(Self::ViabilityTesting),
            "Nursery" => Ok(Self::Nursery),
            "Outplanting" => Ok(Self::Outplanting),
            "OutreachOrEducation" => Ok(Self::OutreachOrEducation),
            "Research" => Ok(Self::Research),
            "ShareWithAnotherSite" => Ok(Self::ShareWithAnotherSite),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidPurpose(s.to_string())),
        }
    }
}

impl std::fmt::Display for WithdrawalPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One withdrawal event against an accession.
///
/// `date` is the effective event date and may be backdated relative to
/// `created_time` for after-the-fact corrections; the timeline sorts by
/// `created_time` but displays `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    /// Row identity; `None` until persisted.
    pub id: Option<WithdrawalId>,
    /// The effective date of the withdrawal.
    pub date: Date,
    /// Why the seeds were withdrawn.
    pub purpose: WithdrawalPurpose,
    /// The quantity withdrawn.
    pub withdrawn: SeedQuantity,
    /// The remaining quantity after this withdrawal.
    ///
    /// For weight-method accessions this is the mandatory fresh scale
    /// reading supplied by the caller; for count-method accessions the
    /// ledger computes it.
    pub remaining: Option<SeedQuantity>,
    /// The viability test this withdrawal reflects, if system-owned.
    /// Immutable once set.
    pub viability_test_id: Option<ViabilityTestId>,
    /// The user who recorded the withdrawal, when known.
    pub withdrawn_by: Option<UserId>,
    /// Freeform staff name for legacy rows with no user id.
    pub staff_responsible: Option<String>,
    /// When the row was recorded; assigned by the store.
    pub created_time: Option<OffsetDateTime>,
}

impl Withdrawal {
    /// Creates a new unpersisted withdrawal.
    #[must_use]
    pub const fn new(date: Date, purpose: WithdrawalPurpose, withdrawn: SeedQuantity) -> Self {
        Self {
            id: None,
            date,
            purpose,
            withdrawn,
            remaining: None,
            viability_test_id: None,
            withdrawn_by: None,
            staff_responsible: None,
            created_time: None,
        }
    }

    /// Returns whether this withdrawal is owned by the viability test
    /// tracker rather than the caller.
    #[must_use]
    pub const fn is_system_owned(&self) -> bool {
        self.viability_test_id.is_some()
    }
}
