// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The facility directory.

use seed_bank_domain::{FacilityId, OrganizationId};
use std::collections::{BTreeSet, HashMap};

/// What kind of site a facility is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacilityType {
    /// A seed bank; accessions live here.
    SeedBank,
    /// A downstream nursery; receives deliveries, holds no accessions.
    Nursery,
}

/// What the store knows about one facility.
#[derive(Debug, Clone)]
pub struct FacilityInfo {
    /// Seed bank or nursery.
    pub facility_type: FacilityType,
    /// The owning organization.
    pub organization_id: OrganizationId,
    /// The storage sub-locations accessions may be filed under.
    pub sub_locations: BTreeSet<String>,
}

/// Facility metadata, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct FacilityDirectory {
    facilities: HashMap<FacilityId, FacilityInfo>,
}

impl FacilityDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a facility.
    pub fn insert(&mut self, facility_id: FacilityId, info: FacilityInfo) {
        self.facilities.insert(facility_id, info);
    }

    /// Looks up a facility.
    #[must_use]
    pub fn get(&self, facility_id: FacilityId) -> Option<&FacilityInfo> {
        self.facilities.get(&facility_id)
    }

    /// Returns the ids of every facility belonging to `organization_id`.
    #[must_use]
    pub fn facilities_of(&self, organization_id: OrganizationId) -> Vec<FacilityId> {
        let mut ids: Vec<FacilityId> = self
            .facilities
            .iter()
            .filter(|(_, info)| info.organization_id == organization_id)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_by_key(|id| id.value());
        ids
    }
}
