// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Timeline reconstruction for the Seed Bank Accession System.
//!
//! An accession's history is scattered across five independently
//! timestamped sources: its creation, its state-history rows, its
//! quantity-history rows, its withdrawals, and its viability tests. This
//! crate merges them into one deterministically ordered, human-readable,
//! reverse-chronological timeline.

mod names;
mod timeline;

#[cfg(test)]
mod tests;

pub use names::{NameResolver, UserProfile};
pub use timeline::{HistoryEntry, HistoryEntryKind, build_history};
