// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Timeline assembly and ordering.

use crate::names::NameResolver;
use seed_bank_domain::{
    Accession, QuantityHistoryEntry, QuantityHistoryType, StateHistoryEntry, WithdrawalPurpose,
};
use std::cmp::Reverse;
use time::{Date, OffsetDateTime};

/// What kind of event a timeline entry describes.
///
/// The declaration order is also the tie-break order for entries written
/// in the same transaction: state changes surface before quantity updates,
/// which surface before withdrawals, and the creation entry always sorts
/// last among its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryEntryKind {
    /// A lifecycle state transition.
    StateChange,
    /// An observed remaining-quantity change.
    QuantityUpdate,
    /// A manual withdrawal.
    Withdrawal,
    /// A viability test's seed consumption.
    ViabilityTest,
    /// The accession's creation.
    Created,
}

impl HistoryEntryKind {
    const fn rank(self) -> u8 {
        match self {
            Self::StateChange => 0,
            Self::QuantityUpdate => 1,
            Self::Withdrawal => 2,
            Self::ViabilityTest => 3,
            Self::Created => 4,
        }
    }
}

/// One human-readable timeline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The kind of event.
    pub kind: HistoryEntryKind,
    /// The displayed event date. For withdrawals this is the effective
    /// (possibly backdated) date, not the recording time.
    pub date: Date,
    /// The recording timestamp the timeline sorts by.
    pub created_time: OffsetDateTime,
    /// The human-readable description, without the actor name.
    pub description: String,
    /// The resolved actor name, or the freeform staff fallback.
    pub actor_name: Option<String>,
    /// The source row id, used as the final ordering tie-break.
    pub source_id: Option<i64>,
}

/// Builds the reverse-chronological timeline for one accession.
///
/// Sources merged: the creation entry, state-history rows (excluding the
/// creation row itself), `Observed` quantity-history rows, manual
/// withdrawals, and viability tests. System-owned withdrawals are excluded
/// because their viability test renders instead, and `Computed` quantity
/// rows are excluded because the withdrawal that caused them renders
/// instead.
///
/// Ordering is `created_time` descending; entries with identical
/// timestamps (written in the same transaction) are ordered by kind, then
/// by source row id descending.
#[must_use]
pub fn build_history(
    accession: &Accession,
    state_history: &[StateHistoryEntry],
    quantity_history: &[QuantityHistoryEntry],
    resolver: &dyn NameResolver,
) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = Vec::new();

    entries.push(HistoryEntry {
        kind: HistoryEntryKind::Created,
        date: accession.created_time.date(),
        created_time: accession.created_time,
        description: String::from("created the accession"),
        actor_name: resolver.resolve(accession.created_by),
        source_id: None,
    });

    for row in state_history {
        // The creation row already renders as the creation entry.
        if row.old_state.is_none() {
            continue;
        }
        entries.push(HistoryEntry {
            kind: HistoryEntryKind::StateChange,
            date: row.updated_time.date(),
            created_time: row.updated_time,
            description: format!("updated the status to {}", row.new_state.display_name()),
            actor_name: resolver.resolve(row.updated_by),
            source_id: row.id.map(|id| id.value()),
        });
    }

    for row in quantity_history {
        if row.history_type != QuantityHistoryType::Observed {
            continue;
        }
        entries.push(HistoryEntry {
            kind: HistoryEntryKind::QuantityUpdate,
            date: row.created_time.date(),
            created_time: row.created_time,
            description: format!("updated the quantity to {}", row.remaining),
            actor_name: resolver.resolve(row.created_by),
            source_id: row.id.map(|id| id.value()),
        });
    }

    for withdrawal in &accession.withdrawals {
        if withdrawal.is_system_owned() {
            continue;
        }
        let mut description = format!("withdrew {}", withdrawal.withdrawn);
        if withdrawal.purpose != WithdrawalPurpose::Other {
            description.push_str(&format!(" for {}", withdrawal.purpose.display_name()));
        }
        let actor_name = withdrawal
            .withdrawn_by
            .and_then(|user_id| resolver.resolve(user_id))
            .or_else(|| withdrawal.staff_responsible.clone());
        entries.push(HistoryEntry {
            kind: HistoryEntryKind::Withdrawal,
            date: withdrawal.date,
            created_time: withdrawal.created_time.unwrap_or(accession.created_time),
            description,
            actor_name,
            source_id: withdrawal.id.map(|id| id.value()),
        });
    }

    for test in &accession.viability_tests {
        let Some(seeds_tested) = test.seeds_tested else {
            continue;
        };
        let noun = if seeds_tested == 1 { "seed" } else { "seeds" };
        entries.push(HistoryEntry {
            kind: HistoryEntryKind::ViabilityTest,
            date: test.start_date,
            created_time: test.created_time.unwrap_or(accession.created_time),
            description: format!("withdrew {seeds_tested} {noun} for viability testing"),
            actor_name: test.staff_responsible.clone(),
            source_id: test.id.map(|id| id.value()),
        });
    }

    entries.sort_by_key(|entry| {
        (
            Reverse(entry.created_time),
            entry.kind.rank(),
            Reverse(entry.source_id),
        )
    });

    entries
}
