// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Viability (germination) tests and their recorded results.

use crate::error::DomainError;
use crate::ids::ViabilityTestId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// The kind of viability test performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViabilityTestType {
    /// A controlled germination trial in the lab.
    Lab,
    /// A germination trial in nursery conditions.
    Nursery,
    /// A cut test inspecting seed fill.
    Cut,
}

impl ViabilityTestType {
    /// Converts this test type to its string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lab => "Lab",
            Self::Nursery => "Nursery",
            Self::Cut => "Cut",
        }
    }
}

impl FromStr for ViabilityTestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lab" => Ok(Self::Lab),
            "Nursery" => Ok(Self::Nursery),
            "Cut" => Ok(Self::Cut),
            _ => Err(DomainError::InvalidTestType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ViabilityTestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded observation within a viability test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// The date the observation was recorded.
    pub recording_date: Date,
    /// How many seeds had germinated by that date.
    pub seeds_germinated: u32,
}

/// A germination trial that consumes a sample of the accession's seeds.
///
/// Each test with a known `seeds_tested` owns exactly one synthetic
/// withdrawal in the accession's ledger; the tracker keeps the two in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViabilityTest {
    /// Row identity; `None` until persisted.
    pub id: Option<ViabilityTestId>,
    /// The kind of test.
    pub test_type: ViabilityTestType,
    /// When the test started; also the date of its synthetic withdrawal.
    pub start_date: Date,
    /// How many seeds the test consumed. Required before the tracker can
    /// mint the synthetic withdrawal.
    pub seeds_tested: Option<u32>,
    /// Recorded observations, in recording order.
    pub test_results: Vec<TestResult>,
    /// Freeform staff name carried onto the synthetic withdrawal.
    pub staff_responsible: Option<String>,
    /// When the row was recorded; assigned by the store.
    pub created_time: Option<OffsetDateTime>,
}

impl ViabilityTest {
    /// Creates a new unpersisted viability test.
    #[must_use]
    pub const fn new(test_type: ViabilityTestType, start_date: Date) -> Self {
        Self {
            id: None,
            test_type,
            start_date,
            seeds_tested: None,
            test_results: Vec::new(),
            staff_responsible: None,
            created_time: None,
        }
    }

    /// Returns the total number of seeds germinated across all recordings.
    ///
    /// `None` when no results have been recorded yet, which is distinct
    /// from a recorded zero.
    #[must_use]
    pub fn total_seeds_germinated(&self) -> Option<u32> {
        if self.test_results.is_empty() {
            None
        } else {
            Some(self.test_results.iter().map(|r| r.seeds_germinated).sum())
        }
    }

    /// Returns the germination percentage, truncated to a whole percent.
    ///
    /// `None` when `seeds_tested` is absent or zero, or when no results
    /// have been recorded.
    #[must_use]
    pub fn total_percent_germinated(&self) -> Option<u32> {
        let tested = self.seeds_tested?;
        if tested == 0 {
            return None;
        }
        let germinated = self.total_seeds_germinated()?;

        u32::try_from(u64::from(germinated) * 100 / u64::from(tested)).ok()
    }

    /// Returns the most recent recording date, if any results exist.
    #[must_use]
    pub fn latest_recording_date(&self) -> Option<Date> {
        self.test_results.iter().map(|r| r.recording_date).max()
    }
}
