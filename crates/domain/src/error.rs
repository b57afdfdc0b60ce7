// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::ids::{ViabilityTestId, WithdrawalId};
use crate::quantity::{SeedQuantityUnits, UnitFamily};
use crate::state::AccessionState;
use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A quantity amount was negative.
    NegativeQuantity {
        /// The offending amount.
        amount: Decimal,
        /// The units the amount was expressed in.
        units: SeedQuantityUnits,
    },
    /// A quantity was expressed in the wrong unit family.
    IncompatibleUnits {
        /// The units that were supplied.
        have: SeedQuantityUnits,
        /// The family that was required.
        want: UnitFamily,
    },
    /// A subtraction would have produced a negative quantity.
    InsufficientQuantity {
        /// The amount requested.
        requested: Decimal,
        /// The amount available.
        available: Decimal,
        /// The units of both amounts.
        units: SeedQuantityUnits,
    },
    /// The subset weight was a seed count instead of a weight measurement.
    SubsetWeightNotWeight,
    /// A withdrawal or viability test was recorded before the total
    /// accession size was set.
    TotalNotSet,
    /// The total accession size was not greater than zero.
    TotalNotPositive,
    /// A total was supplied without selecting a processing method.
    ProcessingMethodNotSet,
    /// The processing method cannot change once a quantity-bearing child
    /// record exists.
    ProcessingMethodImmutable,
    /// A weight-method withdrawal did not state the post-withdrawal
    /// remaining quantity.
    RemainingQuantityRequired,
    /// A manual-state caller requested a state that cannot be assigned
    /// directly.
    InvalidManualState(AccessionState),
    /// A system-owned withdrawal's viability test link cannot be changed.
    ImmutableLink {
        /// The system-owned withdrawal.
        withdrawal_id: WithdrawalId,
    },
    /// Only the viability test tracker may create withdrawals with the
    /// viability-testing purpose.
    ViabilityPurposeReserved,
    /// An update referenced a viability test belonging to a different
    /// accession.
    CrossAccessionReference {
        /// The foreign test id.
        viability_test_id: ViabilityTestId,
    },
    /// An update referenced a withdrawal id that does not exist on this
    /// accession.
    WithdrawalNotFound(WithdrawalId),
    /// Unit string could not be parsed.
    InvalidUnits(String),
    /// State string could not be parsed.
    InvalidState(String),
    /// Processing method string could not be parsed.
    InvalidProcessingMethod(String),
    /// Withdrawal purpose string could not be parsed.
    InvalidPurpose(String),
    /// Viability test type string could not be parsed.
    InvalidTestType(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeQuantity { amount, units } => {
                write!(f, "Quantity cannot be negative: {amount} {units}")
            }
            Self::IncompatibleUnits { have, want } => {
                write!(f, "Quantity must be {want}, but was given in {have}")
            }
            Self::InsufficientQuantity {
                requested,
                available,
                units,
            } => {
                write!(
                    f,
                    "Cannot withdraw {requested} {units}: only {available} {units} remain"
                )
            }
            Self::SubsetWeightNotWeight => {
                write!(
                    f,
                    "Subset weight must be a weight measurement, not a seed count"
                )
            }
            Self::TotalNotSet => {
                write!(
                    f,
                    "Cannot withdraw from an accession before setting its total size"
                )
            }
            Self::TotalNotPositive => {
                write!(f, "Total accession size must be greater than 0")
            }
            Self::ProcessingMethodNotSet => {
                write!(
                    f,
                    "Cannot set total accession size without selecting a processing method"
                )
            }
            Self::ProcessingMethodImmutable => {
                write!(
                    f,
                    "Processing method cannot change once withdrawals or viability tests exist"
                )
            }
            Self::RemainingQuantityRequired => {
                write!(
                    f,
                    "Withdrawals from weight-based accessions must include the remaining quantity"
                )
            }
            Self::InvalidManualState(state) => {
                write!(f, "State '{state}' cannot be assigned manually")
            }
            Self::ImmutableLink { withdrawal_id } => {
                write!(
                    f,
                    "Withdrawal {withdrawal_id} is owned by a viability test and its link cannot change"
                )
            }
            Self::ViabilityPurposeReserved => {
                write!(
                    f,
                    "Only viability tests may create viability-testing withdrawals"
                )
            }
            Self::CrossAccessionReference { viability_test_id } => {
                write!(
                    f,
                    "Viability test {viability_test_id} belongs to a different accession"
                )
            }
            Self::WithdrawalNotFound(id) => {
                write!(f, "Cannot update withdrawal with nonexistent ID {id}")
            }
            Self::InvalidUnits(s) => write!(f, "Unknown quantity units: {s}"),
            Self::InvalidState(s) => write!(f, "Unknown accession state: {s}"),
            Self::InvalidProcessingMethod(s) => write!(f, "Unknown processing method: {s}"),
            Self::InvalidPurpose(s) => write!(f, "Unknown withdrawal purpose: {s}"),
            Self::InvalidTestType(s) => write!(f, "Unknown viability test type: {s}"),
        }
    }
}

impl std::error::Error for DomainError {}
