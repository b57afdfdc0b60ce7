// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for lifecycle states and processing methods.

use crate::{AccessionState, DomainError, ProcessingMethod, SeedQuantityUnits, UnitFamily};

#[test]
fn test_count_method_accepts_only_seeds() {
    assert!(ProcessingMethod::Count.accepts(SeedQuantityUnits::Seeds));
    assert!(!ProcessingMethod::Count.accepts(SeedQuantityUnits::Grams));
}

#[test]
fn test_weight_method_accepts_any_weight_unit() {
    assert!(ProcessingMethod::Weight.accepts(SeedQuantityUnits::Milligrams));
    assert!(ProcessingMethod::Weight.accepts(SeedQuantityUnits::Pounds));
    assert!(!ProcessingMethod::Weight.accepts(SeedQuantityUnits::Seeds));
}

#[test]
fn test_method_family() {
    assert_eq!(ProcessingMethod::Count.family(), UnitFamily::Count);
    assert_eq!(ProcessingMethod::Weight.family(), UnitFamily::Weight);
}

#[test]
fn test_default_state_is_awaiting_check_in() {
    assert_eq!(AccessionState::default(), AccessionState::AwaitingCheckIn);
}

#[test]
fn test_only_used_up_is_inactive() {
    for state in AccessionState::all() {
        assert_eq!(state.is_active(), state != AccessionState::UsedUp);
    }
}

#[test]
fn test_legacy_states() {
    assert!(AccessionState::Processed.is_legacy());
    assert!(AccessionState::Dried.is_legacy());
    assert!(!AccessionState::Drying.is_legacy());
    assert!(!AccessionState::InStorage.is_legacy());
}

#[test]
fn test_manual_assignment_excludes_legacy_and_used_up() {
    assert!(AccessionState::AwaitingCheckIn.allows_manual_assignment());
    assert!(AccessionState::AwaitingProcessing.allows_manual_assignment());
    assert!(AccessionState::Processing.allows_manual_assignment());
    assert!(AccessionState::Drying.allows_manual_assignment());
    assert!(AccessionState::InStorage.allows_manual_assignment());

    assert!(!AccessionState::Processed.allows_manual_assignment());
    assert!(!AccessionState::Dried.allows_manual_assignment());
    assert!(!AccessionState::UsedUp.allows_manual_assignment());
}

#[test]
fn test_states_are_ordered_along_the_lifecycle() {
    assert!(AccessionState::AwaitingCheckIn < AccessionState::AwaitingProcessing);
    assert!(AccessionState::AwaitingProcessing < AccessionState::Processing);
    assert!(AccessionState::Processing < AccessionState::Drying);
    assert!(AccessionState::Drying < AccessionState::InStorage);
    assert!(AccessionState::InStorage < AccessionState::UsedUp);
}

#[test]
fn test_state_round_trips_through_strings() {
    for state in AccessionState::all() {
        let parsed: AccessionState = state.as_str().parse().unwrap();
        assert_eq!(parsed, state);
    }

    let result: Result<AccessionState, DomainError> = "Germinating".parse();
    assert!(matches!(result.unwrap_err(), DomainError::InvalidState(_)));
}

#[test]
fn test_state_display_names() {
    assert_eq!(
        AccessionState::AwaitingCheckIn.display_name(),
        "Awaiting Check-In"
    );
    assert_eq!(AccessionState::InStorage.display_name(), "In Storage");
    assert_eq!(AccessionState::UsedUp.display_name(), "Used Up");
}
