// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Tunable parameters for the event solver.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`get_solar_times_with`](crate::get_solar_times_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolarConfig {
    /// Upper bound on the number of whole days the polar fallback search
    /// may step before giving up. Default: 366.
    ///
    /// Away from the exact poles the hour-angle equation becomes solvable
    /// again within half a year, so the default is never reached there.
    pub max_search_days: u32,
}

impl SolarConfig {
    pub const DEFAULT_MAX_SEARCH_DAYS: u32 = 366;

    pub fn with_max_search_days(mut self, days: u32) -> Self {
        self.max_search_days = days;
        self
    }
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            max_search_days: Self::DEFAULT_MAX_SEARCH_DAYS,
        }
    }
}
