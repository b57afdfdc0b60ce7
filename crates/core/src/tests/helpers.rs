// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for engine tests.

use rust_decimal::Decimal;
use seed_bank_domain::{
    Accession, AccessionId, AccessionState, FacilityId, ProcessingMethod, SeedQuantity,
    SeedQuantityUnits, UserId, ViabilityTest, ViabilityTestId, ViabilityTestType, Withdrawal,
    WithdrawalId, WithdrawalPurpose,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const NOW: OffsetDateTime = datetime!(2026-04-01 12:00 UTC);

/// A persisted count-method accession in `Processing` with `total` and
/// `remaining` both at `total_seeds`.
pub fn count_accession(total_seeds: u32) -> Accession {
    let mut accession: Accession = Accession::new(
        FacilityId::new(1),
        UserId::new(7),
        datetime!(2026-01-15 10:00 UTC),
    );
    accession.id = Some(AccessionId::new(100));
    accession.accession_number = Some(String::from("26-1-1-001"));
    accession.processing_method = Some(ProcessingMethod::Count);
    accession.state = AccessionState::Processing;
    accession.total = Some(SeedQuantity::seeds(total_seeds));
    accession.remaining = Some(SeedQuantity::seeds(total_seeds));
    accession.checked_in_time = Some(datetime!(2026-01-16 09:00 UTC));
    accession
}

/// A persisted weight-method accession in `Processing`, measured in grams.
pub fn weight_accession(total_grams: Decimal) -> Accession {
    let mut accession: Accession = count_accession(0);
    accession.processing_method = Some(ProcessingMethod::Weight);
    accession.total = Some(grams(total_grams));
    accession.remaining = Some(grams(total_grams));
    accession
}

pub fn grams(amount: Decimal) -> SeedQuantity {
    SeedQuantity::new(amount, SeedQuantityUnits::Grams).unwrap()
}

/// A caller-supplied withdrawal with no id yet.
pub fn manual_withdrawal(date: Date, seeds: u32) -> Withdrawal {
    Withdrawal::new(date, WithdrawalPurpose::Research, SeedQuantity::seeds(seeds))
}

/// A persisted viability test with its synthetic withdrawal already
/// attached to `accession`.
pub fn attach_viability_test(
    accession: &mut Accession,
    test_id: i64,
    withdrawal_id: i64,
    seeds_tested: u32,
) {
    let mut test: ViabilityTest =
        ViabilityTest::new(ViabilityTestType::Lab, date!(2026 - 02 - 10));
    test.id = Some(ViabilityTestId::new(test_id));
    test.seeds_tested = Some(seeds_tested);
    test.created_time = Some(datetime!(2026-02-10 08:00 UTC));
    accession.viability_tests.push(test);

    let mut withdrawal: Withdrawal = Withdrawal::new(
        date!(2026 - 02 - 10),
        WithdrawalPurpose::ViabilityTesting,
        SeedQuantity::seeds(seeds_tested),
    );
    withdrawal.id = Some(WithdrawalId::new(withdrawal_id));
    withdrawal.viability_test_id = Some(ViabilityTestId::new(test_id));
    withdrawal.created_time = Some(datetime!(2026-02-10 08:00 UTC));
    accession.withdrawals.push(withdrawal);
}
