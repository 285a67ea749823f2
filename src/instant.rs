// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil instants supplied by, and returned to, the caller.
//!
//! The solar math never parses or formats dates itself.  It only needs a
//! handful of calendar operations, gathered in the [`CivilInstant`] trait and
//! implemented for every `chrono::DateTime<Tz>`.
//!
//! The UTC offset of the input instant is treated as **fixed**: every instant
//! derived from it (local midnight of the target day, of a fallback day, or
//! midnight plus N minutes) is computed with that same offset, even if `Tz`
//! would observe a different one on another day.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, TimeDelta, TimeZone, Timelike};

use crate::julian::JulianDay;

/// Calendar operations the solar calculations need from a date/time type.
pub trait CivilInstant: Clone + Sized {
    /// The caller-declared UTC offset, in hours (may be fractional).
    fn utc_offset_hours(&self) -> f64;

    /// Civil date in the instant's own offset.
    fn civil_date(&self) -> NaiveDate;

    /// Minutes elapsed since local midnight.
    fn minutes_since_midnight(&self) -> f64;

    /// Local midnight of `date`, expressed with this instant's offset.
    ///
    /// Returns `None` if the result is not representable.
    fn midnight_on(&self, date: NaiveDate) -> Option<Self>;

    /// This instant shifted by a (fractional, possibly negative) number of
    /// minutes, rounded to the millisecond.
    fn add_minutes(&self, minutes: f64) -> Option<Self>;

    /// Fractional Julian Day of this instant.
    fn julian_day(&self) -> JulianDay;

    /// Local midnight of this instant's own civil date.
    fn start_of_day(&self) -> Option<Self> {
        self.midnight_on(self.civil_date())
    }
}

impl<Tz: TimeZone> CivilInstant for DateTime<Tz> {
    fn utc_offset_hours(&self) -> f64 {
        f64::from(self.offset().fix().local_minus_utc()) / 3600.0
    }

    fn civil_date(&self) -> NaiveDate {
        self.date_naive()
    }

    fn minutes_since_midnight(&self) -> f64 {
        let seconds = f64::from(self.num_seconds_from_midnight())
            + f64::from(self.nanosecond()) / 1e9;
        seconds / 60.0
    }

    fn midnight_on(&self, date: NaiveDate) -> Option<Self> {
        let fixed: FixedOffset = self.offset().fix();
        let local = date.and_hms_opt(0, 0, 0)?;
        let midnight = fixed.from_local_datetime(&local).single()?;
        Some(midnight.with_timezone(&self.timezone()))
    }

    fn add_minutes(&self, minutes: f64) -> Option<Self> {
        let millis = (minutes * 60_000.0).round();
        if !millis.is_finite() {
            return None;
        }
        let delta = TimeDelta::try_milliseconds(millis as i64)?;
        self.clone().checked_add_signed(delta)
    }

    fn julian_day(&self) -> JulianDay {
        let seconds = self.timestamp() as f64 + f64::from(self.timestamp_subsec_nanos()) / 1e9;
        JulianDay::from_unix_seconds(seconds)
    }
}
