// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Seed quantities and unit arithmetic.
//!
//! A quantity is an amount plus a unit. Units fall into two families:
//! discrete seed counts (`Seeds`) and weight measurements, each weight unit
//! convertible to grams via a fixed multiplier. Quantities from different
//! families are never interchangeable; arithmetic across families fails with
//! [`DomainError::IncompatibleUnits`] rather than guessing.
//!
//! All arithmetic is decimal ([`rust_decimal::Decimal`]), never floating
//! point, so repeated withdrawals do not accumulate rounding error.

use crate::error::DomainError;
use num_traits::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The two unit families.
///
/// Quantities are only ever comparable or convertible within one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitFamily {
    /// Discrete seed counts.
    Count,
    /// Weight measurements.
    Weight,
}

impl std::fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Count => write!(f, "a seed count"),
            Self::Weight => write!(f, "a weight measurement"),
        }
    }
}

/// The units a seed quantity can be expressed in.
///
/// `Seeds` is the count family; everything else is the weight family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedQuantityUnits {
    /// A discrete seed count.
    Seeds,
    /// Weight in milligrams.
    Milligrams,
    /// Weight in grams (the canonical weight base).
    Grams,
    /// Weight in kilograms.
    Kilograms,
    /// Weight in avoirdupois ounces.
    Ounces,
    /// Weight in avoirdupois pounds.
    Pounds,
}

impl SeedQuantityUnits {
    /// Returns whether this unit is in the weight family.
    #[must_use]
    pub const fn is_weight(self) -> bool {
        !matches!(self, Self::Seeds)
    }

    /// Returns whether this unit and `other` are in the same family.
    #[must_use]
    pub const fn is_compatible_with(self, other: Self) -> bool {
        self.is_weight() == other.is_weight()
    }

    /// Returns the family this unit belongs to.
    #[must_use]
    pub const fn family(self) -> UnitFamily {
        if self.is_weight() {
            UnitFamily::Weight
        } else {
            UnitFamily::Count
        }
    }

    /// Returns the grams-per-unit multiplier for weight units.
    ///
    /// `None` for `Seeds`: a count has no weight equivalent.
    #[must_use]
    pub fn grams_multiplier(self) -> Option<Decimal> {
        match self {
            Self::Seeds => None,
            Self::Milligrams => Some(dec!(0.001)),
            Self::Grams => Some(Decimal::ONE),
            Self::Kilograms => Some(dec!(1000)),
            Self::Ounces => Some(dec!(28.349523125)),
            Self::Pounds => Some(dec!(453.59237)),
        }
    }

    /// Converts this unit to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Seeds => "Seeds",
            Self::Milligrams => "Milligrams",
            Self::Grams => "Grams",
            Self::Kilograms => "Kilograms",
            Self::Ounces => "Ounces",
            Self::Pounds => "Pounds",
        }
    }

    /// Returns the lowercase form used in human-readable timeline text.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Seeds => "seeds",
            Self::Milligrams => "milligrams",
            Self::Grams => "grams",
            Self::Kilograms => "kilograms",
            Self::Ounces => "ounces",
            Self::Pounds => "pounds",
        }
    }
}

impl FromStr for SeedQuantityUnits {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Seeds" => Ok(Self::Seeds),
            "Milligrams" => Ok(Self::Milligrams),
            "Grams" => Ok(Self::Grams),
            "Kilograms" => Ok(Self::Kilograms),
            "Ounces" => Ok(Self::Ounces),
            "Pounds" => Ok(Self::Pounds),
            _ => Err(DomainError::InvalidUnits(s.to_string())),
        }
    }
}

impl std::fmt::Display for SeedQuantityUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An amount of seeds with a unit.
///
/// The amount is never negative; the constructor rejects negative values
/// rather than clamping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedQuantity {
    amount: Decimal,
    units: SeedQuantityUnits,
}

impl SeedQuantity {
    /// Creates a new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NegativeQuantity`] if `amount` is negative.
    pub fn new(amount: Decimal, units: SeedQuantityUnits) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::NegativeQuantity { amount, units });
        }
        Ok(Self { amount, units })
    }

    /// Creates a seed-count quantity.
    #[must_use]
    pub fn seeds(count: u32) -> Self {
        Self {
            amount: Decimal::from(count),
            units: SeedQuantityUnits::Seeds,
        }
    }

    /// Returns the amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the units.
    #[must_use]
    pub const fn units(&self) -> SeedQuantityUnits {
        self.units
    }

    /// Returns whether the amount is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns whether this quantity's unit is family-compatible with `units`.
    #[must_use]
    pub const fn is_compatible_with(&self, units: SeedQuantityUnits) -> bool {
        self.units.is_compatible_with(units)
    }

    /// Returns this quantity expressed in grams.
    ///
    /// `None` for seed counts, which have no weight equivalent.
    #[must_use]
    pub fn grams(&self) -> Option<Decimal> {
        self.units.grams_multiplier().map(|m| self.amount * m)
    }

    /// Converts this quantity to another unit in the same family.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompatibleUnits`] if `target` is in a
    /// different unit family.
    pub fn to_units(&self, target: SeedQuantityUnits) -> Result<Self, DomainError> {
        if self.units == target {
            return Ok(*self);
        }
        match (self.units.grams_multiplier(), target.grams_multiplier()) {
            (Some(from_grams), Some(to_grams)) => Ok(Self {
                amount: self.amount * from_grams / to_grams,
                units: target,
            }),
            _ => Err(DomainError::IncompatibleUnits {
                have: self.units,
                want: target.family(),
            }),
        }
    }

    /// Subtracts `other` from this quantity, converting units as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompatibleUnits`] if the quantities are in
    /// different unit families, or [`DomainError::InsufficientQuantity`] if
    /// the result would be negative.
    pub fn checked_sub(&self, other: &Self) -> Result<Self, DomainError> {
        let subtrahend = other.to_units(self.units)?;
        let amount = self.amount - subtrahend.amount;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::InsufficientQuantity {
                requested: subtrahend.amount,
                available: self.amount,
                units: self.units,
            });
        }
        Ok(Self {
            amount,
            units: self.units,
        })
    }
}

impl std::fmt::Display for SeedQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}",
            self.amount.normalize(),
            self.units.display_name()
        )
    }
}

/// Estimates the seed count of a weighed quantity by subset sampling.
///
/// A small sample of `subset_count` seeds is weighed (`subset_weight`); the
/// estimate is `round(total.grams / subset_weight.grams * subset_count)`.
/// If `total` is already a seed count, the count itself is returned.
///
/// Returns `None` (not zero) when `total` is absent or the subset pair is
/// incomplete: an unknown estimate is not an estimate of zero.
///
/// # Errors
///
/// Returns [`DomainError::SubsetWeightNotWeight`] if `subset_weight` is a
/// seed count instead of a weight measurement.
pub fn estimate_seed_count(
    total: Option<&SeedQuantity>,
    subset_count: Option<u32>,
    subset_weight: Option<&SeedQuantity>,
) -> Result<Option<u32>, DomainError> {
    let Some(total) = total else {
        return Ok(None);
    };

    if total.units() == SeedQuantityUnits::Seeds {
        return Ok(total.amount().to_u32());
    }

    let (Some(subset_count), Some(subset_weight)) = (subset_count, subset_weight) else {
        return Ok(None);
    };

    let Some(subset_grams) = subset_weight.grams() else {
        return Err(DomainError::SubsetWeightNotWeight);
    };

    let Some(total_grams) = total.grams() else {
        return Ok(None);
    };

    if subset_grams.is_zero() {
        return Ok(None);
    }

    let estimate = (total_grams / subset_grams * Decimal::from(subset_count))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Ok(estimate.to_u32())
}
