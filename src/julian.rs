// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day arithmetic and calendar conversions.
//!
//! [`JulianDay`] stores a single [`Days`] quantity counted from the Julian
//! epoch (noon, 1 January 4713 BCE).  Two forms appear in this crate:
//!
//! - the **instant** form, a fractional JD for a precise moment
//!   ([`JulianDay::from_unix_seconds`]);
//! - the **day anchor** form, always `n + 0.5` (0h UT of a civil date), used
//!   by the event solver so that stepping by whole days stays exact
//!   ([`JulianDay::for_civil_day`]).
//!
//! Calendar conversions follow the standard algorithm from Meeus,
//! *Astronomical Algorithms* ch. 7: Gregorian calendar from 1582-10-15
//! (JD 2 299 161) onwards, Julian calendar before.

use chrono::NaiveDate;
use qtty::{Centuries, Days, Simplify};
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::instant::CivilInstant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// First JD of the Gregorian calendar (1582-10-15, 0h rounded up to the day number).
const GREGORIAN_START_JDN: f64 = 2_299_161.0;

/// JD of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A point on the Julian Day axis.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

/// A calendar date recovered from a [`JulianDay`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Fraction of the day elapsed since 0h UT, in `[0, 1)`.
    pub day_fraction: f64,
}

impl CalendarDate {
    /// The same date as a proleptic `chrono` date.
    ///
    /// Returns `None` if chrono cannot represent it.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// `true` for Gregorian leap years.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    // ── constructors ──────────────────────────────────────────────────

    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// Instant form: JD of a moment given as seconds since the Unix epoch.
    pub fn from_unix_seconds(seconds: f64) -> Self {
        Self::new(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// JD at 0h UT of a calendar date.
    ///
    /// Dates before 1582-10-15 are read in the Julian calendar.
    pub fn from_calendar_date(year: i32, month: u32, day: u32) -> Self {
        let gregorian = (year, month, day) >= (1582, 10, 15);
        let (y, m) = if month <= 2 {
            (f64::from(year - 1), f64::from(month + 12))
        } else {
            (f64::from(year), f64::from(month))
        };
        let b = if gregorian {
            let a = (y / 100.0).floor();
            2.0 - a + (a / 4.0).floor()
        } else {
            0.0
        };
        Self::new(
            (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + f64::from(day) + b
                - 1524.5,
        )
    }

    /// JD at 0h UT of a chrono date.
    pub fn from_naive_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::from_calendar_date(date.year(), date.month(), date.day())
    }

    /// Day anchor for the event solver: the instant is floored to the
    /// start of its own civil day and the result is 0h UT of that date.
    pub fn for_civil_day<T: CivilInstant>(instant: &T) -> Self {
        Self::from_naive_date(instant.civil_date())
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Julian centuries since J2000.0, the argument `T` of every
    /// position-model formula.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((self.quantity - Self::J2000.quantity) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Inverse of [`julian_centuries`](Self::julian_centuries).
    #[inline]
    pub fn from_julian_centuries(t: Centuries) -> Self {
        Self::J2000 + Days::new(t.value() * Self::JULIAN_CENTURY.value())
    }

    /// Offset by a number of minutes (may be fractional or negative).
    #[inline]
    pub fn add_minutes(self, minutes: f64) -> Self {
        self + Days::new(minutes / 1440.0)
    }

    // ── calendar ──────────────────────────────────────────────────────

    /// Calendar date containing this JD.
    pub fn to_calendar_date(&self) -> CalendarDate {
        let shifted = self.value() + 0.5;
        let z = shifted.floor();
        let day_fraction = shifted - z;
        let a = if z < GREGORIAN_START_JDN {
            z
        } else {
            let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
            z + 1.0 + alpha - (alpha / 4.0).floor()
        };
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).floor();
        let d = (365.25 * c).floor();
        let e = ((b - d) / 30.6001).floor();
        let day = b - d - (30.6001 * e).floor();
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
        CalendarDate {
            year: year as i32,
            month: month as u32,
            day: day as u32,
            day_fraction,
        }
    }

    /// Day of the year (1-based), including the fraction of the day.
    pub fn day_of_year(&self) -> f64 {
        let date = self.to_calendar_date();
        let k = if is_leap_year(date.year) { 1.0 } else { 2.0 };
        let month = f64::from(date.month);
        (275.0 * month / 9.0).floor() - k * ((month + 9.0) / 12.0).floor()
            + f64::from(date.day)
            + date.day_fraction
            - 30.0
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {}", self.value())
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for JulianDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl AddAssign<Days> for JulianDay {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity = self.quantity + rhs;
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl SubAssign<Days> for JulianDay {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity = self.quantity - rhs;
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl From<Centuries> for JulianDay {
    fn from(t: Centuries) -> Self {
        Self::from_julian_centuries(t)
    }
}

impl From<JulianDay> for Centuries {
    fn from(jd: JulianDay) -> Self {
        jd.julian_centuries()
    }
}
