// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Explicit clocks.
//!
//! The store never reads ambient time; every operation takes the clock as
//! a parameter so tests can pin or advance it freely.

use std::cell::Cell;
use time::{Date, OffsetDateTime};

/// A source of "now".
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> OffsetDateTime;

    /// Returns the current date.
    fn today(&self) -> Date {
        self.now().date()
    }
}

/// The wall clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock pinned to a fixed instant, advanceable by tests.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<OffsetDateTime>,
}

impl FixedClock {
    /// Creates a clock pinned to `now`.
    #[must_use]
    pub const fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, duration: time::Duration) {
        self.now.set(self.now.get() + duration);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.now.get()
    }
}
