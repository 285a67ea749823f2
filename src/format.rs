// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Compact clock and day strings for reporting event times.

use crate::events::SearchDirection;
use crate::julian::JulianDay;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Julian Days outside this range are rejected by [`day_string`].
const DAY_STRING_JD_RANGE: std::ops::RangeInclusive<f64> = 900_000.0..=2_817_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPrecision {
    /// `HH:MM`, seconds ≥ 30 round the minute up.
    Minutes,
    /// `HH:MM:SS`.
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStyle {
    /// `21 May`
    DayMonth,
    /// `21May2017`
    DayMonthYear,
    /// `21May2017 prev` / `21May2017 next`
    WithDirection(SearchDirection),
}

/// Formats minutes after midnight as a zero-padded clock time.
///
/// Returns `None` outside `[0, 1440)`.  Values that round up to the end of
/// the day read `00:00`.
pub fn time_string(minutes: f64, precision: ClockPrecision) -> Option<String> {
    if !(0.0..1440.0).contains(&minutes) {
        return None;
    }
    let float_hour = minutes / 60.0;
    let mut hour = float_hour.floor() as u32;
    let float_minute = 60.0 * (float_hour - float_hour.floor());
    let mut minute = float_minute.floor() as u32;
    let float_second = 60.0 * (float_minute - float_minute.floor());
    let mut second = (float_second + 0.5).floor() as u32;

    if second > 59 {
        second = 0;
        minute += 1;
    }
    if precision == ClockPrecision::Minutes && second >= 30 {
        minute += 1;
    }
    if minute > 59 {
        minute = 0;
        hour += 1;
    }
    if hour > 23 {
        hour = 0;
    }
    Some(match precision {
        ClockPrecision::Minutes => format!("{hour:02}:{minute:02}"),
        ClockPrecision::Seconds => format!("{hour:02}:{minute:02}:{second:02}"),
    })
}

/// Formats the calendar day containing `jd`.
///
/// Returns `None` for JDs outside `[900000, 2817000]`.
pub fn day_string(jd: JulianDay, style: DayStyle) -> Option<String> {
    if !DAY_STRING_JD_RANGE.contains(&jd.value()) {
        return None;
    }
    let date = jd.to_calendar_date();
    let month = MONTH_ABBR[(date.month as usize).checked_sub(1)?];
    let day = date.day;
    let year = date.year;
    Some(match style {
        DayStyle::DayMonth => format!("{day:02} {month}"),
        DayStyle::DayMonthYear => format!("{day:02}{month}{year}"),
        DayStyle::WithDirection(direction) => {
            let tag = match direction {
                SearchDirection::Forward => "next",
                SearchDirection::Backward => "prev",
            };
            format!("{day:02}{month}{year} {tag}")
        }
    })
}
