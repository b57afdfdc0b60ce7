// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Display-name resolution for timeline actors.

use seed_bank_domain::UserId;
use std::collections::HashMap;

/// The name fields known for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    /// Given name, when recorded.
    pub first_name: Option<String>,
    /// Family name, when recorded.
    pub last_name: Option<String>,
}

impl UserProfile {
    /// Creates a profile with both names set.
    #[must_use]
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: Some(last_name.to_string()),
        }
    }

    /// Returns the display name: first plus last, first alone, or nothing.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            _ => None,
        }
    }
}

/// Resolves a user id to a display name.
///
/// Implemented by whatever user registry the caller keeps; a resolver that
/// knows nothing simply returns `None` and the timeline falls back to
/// freeform staff names where it has them.
pub trait NameResolver {
    /// Returns the display name for `user_id`, if resolvable.
    fn resolve(&self, user_id: UserId) -> Option<String>;
}

impl NameResolver for HashMap<UserId, UserProfile> {
    fn resolve(&self, user_id: UserId) -> Option<String> {
        self.get(&user_id).and_then(UserProfile::display_name)
    }
}
