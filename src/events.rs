// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar noon, sunrise and sunset
//!
//! Every event is located on a **day anchor**: the JD of 0h UT of the
//! caller's civil date ([`JulianDay::for_civil_day`]).  Stepping the anchor
//! by whole days keeps it on the `n + 0.5` grid.
//!
//! ## Sunrise / sunset
//!
//! 1. First estimate of the UTC event time from the hour-angle equation
//!    evaluated at the anchor.
//! 2. One refinement: re-evaluate at `anchor + estimate / 1440`.
//! 3. If either step has no solution the Sun does not cross the horizon that
//!    day.  The date is classified as polar day or polar night and the
//!    nearest day with a real event is searched, backwards or forwards:
//!
//! | Regime | Event | Search |
//! |--------|-------|--------|
//! | polar day | sunrise | backward (most recent sunrise) |
//! | polar day | sunset | forward (next sunset) |
//! | polar night | sunrise | forward (next sunrise) |
//! | polar night | sunset | backward (most recent sunset) |
//!
//! A fallback result carries only a calendar day: it is reported as local
//! midnight of the day found.
//!
//! ## Solar noon
//!
//! Same two-step estimate on the equation of time, wrapped into a single
//! local day.  Solar noon always exists, so there is no fallback.

use log::{debug, warn};
use qtty::Days;
use std::fmt;

use crate::config::SolarConfig;
use crate::coordinate::GeoCoordinate;
use crate::error::SolarError;
use crate::instant::CivilInstant;
use crate::julian::JulianDay;
use crate::position::{declination, equation_of_time, hour_angle_sunrise};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Latitude beyond which a missing event may mean continuous daylight.
pub const POLAR_LATITUDE_DEG: f64 = 66.4;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Which horizon crossing is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HorizonEvent {
    Sunrise,
    Sunset,
}

impl fmt::Display for HorizonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunrise => f.write_str("sunrise"),
            Self::Sunset => f.write_str("sunset"),
        }
    }
}

/// Result of solving the hour-angle equation for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// Event time in minutes after 0h UT of the anchor day (may lie outside
    /// `[0, 1440)`).
    Found(f64),
    /// The Sun does not cross the horizon on that day.
    NotFound,
}

impl EventOutcome {
    #[inline]
    pub fn minutes(self) -> Option<f64> {
        match self {
            Self::Found(minutes) => Some(minutes),
            Self::NotFound => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PolarRegime {
    /// The Sun stays above the horizon all day.
    PolarDay,
    /// The Sun stays below the horizon all day.
    PolarNight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SearchDirection {
    /// Decreasing JD: most recent event.
    Backward,
    /// Increasing JD: next event.
    Forward,
}

impl SearchDirection {
    #[inline]
    fn step(self) -> Days {
        match self {
            Self::Backward => Days::new(-1.0),
            Self::Forward => Days::new(1.0),
        }
    }
}

/// How a sunrise or sunset was obtained when the requested day had none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolarFallback {
    pub regime: PolarRegime,
    pub direction: SearchDirection,
}

/// Solar noon, sunrise and sunset for one civil day.
///
/// There is no ordering guarantee between the fields: near the polar
/// circles sunset may fall after local midnight, and fallback results can be
/// weeks away from the requested day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarTimes<T> {
    pub solar_noon: T,
    pub sunrise: T,
    pub sunset: T,
    /// Set when `sunrise` is only a calendar day (local midnight).
    pub sunrise_fallback: Option<PolarFallback>,
    /// Set when `sunset` is only a calendar day (local midnight).
    pub sunset_fallback: Option<PolarFallback>,
}

/// Raw UTC event time on the day anchored at `jd`, in minutes.
pub fn sunrise_set_utc(event: HorizonEvent, jd: JulianDay, coord: &GeoCoordinate) -> EventOutcome {
    let t = jd.julian_centuries();
    let eq_time = equation_of_time(t);
    let solar_dec = declination(t);
    let Some(hour_angle) = hour_angle_sunrise(coord.latitude, solar_dec) else {
        return EventOutcome::NotFound;
    };
    let hour_angle = match event {
        HorizonEvent::Sunrise => hour_angle,
        HorizonEvent::Sunset => -hour_angle,
    };
    let delta = coord.longitude + hour_angle.to_degrees();
    EventOutcome::Found(720.0 - 4.0 * delta - eq_time)
}

/// UTC event time with one refinement at the estimated instant.
pub fn event_minutes_utc(event: HorizonEvent, jd: JulianDay, coord: &GeoCoordinate) -> EventOutcome {
    match sunrise_set_utc(event, jd, coord) {
        EventOutcome::Found(estimate) => sunrise_set_utc(event, jd.add_minutes(estimate), coord),
        EventOutcome::NotFound => EventOutcome::NotFound,
    }
}

/// Classifies a day without sunrise or sunset.
///
/// `day_of_year` thresholds are exclusive: north of 66.4° days 80–266 are
/// polar day, south of −66.4° days before 83 or after 263 are.  Everything
/// else is treated as polar night.
pub fn polar_regime(latitude: f64, day_of_year: f64) -> PolarRegime {
    let northern_summer =
        latitude > POLAR_LATITUDE_DEG && day_of_year > 79.0 && day_of_year < 267.0;
    let southern_summer =
        latitude < -POLAR_LATITUDE_DEG && (day_of_year < 83.0 || day_of_year > 263.0);
    if northern_summer || southern_summer {
        PolarRegime::PolarDay
    } else {
        PolarRegime::PolarNight
    }
}

pub fn search_direction(regime: PolarRegime, event: HorizonEvent) -> SearchDirection {
    match (regime, event) {
        (PolarRegime::PolarDay, HorizonEvent::Sunrise) => SearchDirection::Backward,
        (PolarRegime::PolarDay, HorizonEvent::Sunset) => SearchDirection::Forward,
        (PolarRegime::PolarNight, HorizonEvent::Sunrise) => SearchDirection::Forward,
        (PolarRegime::PolarNight, HorizonEvent::Sunset) => SearchDirection::Backward,
    }
}

/// Steps the anchor one day at a time until the raw hour-angle equation has
/// a solution, then returns the anchor of the local day containing it.
///
/// The local event time is wrapped into `[0, 1440)` by moving the day, so the
/// reported day can differ by one from the first solvable anchor.
pub fn nearest_event_day(
    event: HorizonEvent,
    direction: SearchDirection,
    jd: JulianDay,
    coord: &GeoCoordinate,
    utc_offset_hours: f64,
    max_days: u32,
) -> Result<JulianDay, SolarError> {
    let mut day = jd;
    let mut steps = 0u32;
    let minutes_utc = loop {
        if let EventOutcome::Found(minutes) = sunrise_set_utc(event, day, coord) {
            break minutes;
        }
        if steps == max_days {
            warn!(
                "no {event} within {max_days} days of {jd} at latitude {}",
                coord.latitude
            );
            return Err(SolarError::SearchExhausted {
                event,
                days: max_days,
            });
        }
        day += direction.step();
        steps += 1;
    };

    let local = minutes_utc + utc_offset_hours * 60.0;
    day += Days::new(local.div_euclid(MINUTES_PER_DAY));
    debug!("{event} found {steps} day(s) {direction:?} of {jd}: {day}");
    Ok(day)
}

/// Local solar noon in minutes after local midnight, in `[0, 1440)`.
pub fn solar_noon_minutes(jd: JulianDay, longitude: f64, utc_offset_hours: f64) -> f64 {
    let t_noon = (jd - Days::new(longitude / 360.0)).julian_centuries();
    let estimate = 720.0 - 4.0 * longitude - equation_of_time(t_noon);
    let t = jd.add_minutes(estimate).julian_centuries();
    let local = 720.0 - 4.0 * longitude - equation_of_time(t) + utc_offset_hours * 60.0;
    let wrapped = local.rem_euclid(MINUTES_PER_DAY);
    // rem_euclid rounds tiny negatives up to the modulus itself.
    if wrapped < MINUTES_PER_DAY {
        wrapped
    } else {
        0.0
    }
}

/// Solar noon, sunrise and sunset on the civil day of `instant`.
pub fn solar_times<T: CivilInstant>(
    coord: &GeoCoordinate,
    instant: &T,
    config: &SolarConfig,
) -> Result<SolarTimes<T>, SolarError> {
    let jd = JulianDay::for_civil_day(instant);
    let midnight = instant.start_of_day().ok_or(SolarError::InstantOutOfRange)?;

    let noon = solar_noon_minutes(jd, coord.longitude, instant.utc_offset_hours());
    let solar_noon = midnight
        .add_minutes(noon)
        .ok_or(SolarError::InstantOutOfRange)?;
    let (sunrise, sunrise_fallback) =
        event_instant(HorizonEvent::Sunrise, jd, coord, &midnight, config)?;
    let (sunset, sunset_fallback) =
        event_instant(HorizonEvent::Sunset, jd, coord, &midnight, config)?;

    Ok(SolarTimes {
        solar_noon,
        sunrise,
        sunset,
        sunrise_fallback,
        sunset_fallback,
    })
}

fn event_instant<T: CivilInstant>(
    event: HorizonEvent,
    jd: JulianDay,
    coord: &GeoCoordinate,
    midnight: &T,
    config: &SolarConfig,
) -> Result<(T, Option<PolarFallback>), SolarError> {
    let utc_offset_hours = midnight.utc_offset_hours();
    if let EventOutcome::Found(minutes_utc) = event_minutes_utc(event, jd, coord) {
        let instant = midnight
            .add_minutes(minutes_utc + utc_offset_hours * 60.0)
            .ok_or(SolarError::InstantOutOfRange)?;
        return Ok((instant, None));
    }

    let regime = polar_regime(coord.latitude, jd.day_of_year());
    let direction = search_direction(regime, event);
    debug!(
        "no {event} on {jd} at latitude {}: {regime:?}, searching {direction:?}",
        coord.latitude
    );
    let day = nearest_event_day(
        event,
        direction,
        jd,
        coord,
        utc_offset_hours,
        config.max_search_days,
    )?;
    let date = day
        .to_calendar_date()
        .to_naive_date()
        .ok_or(SolarError::InstantOutOfRange)?;
    let instant = midnight
        .midnight_on(date)
        .ok_or(SolarError::InstantOutOfRange)?;
    Ok((instant, Some(PolarFallback { regime, direction })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleveland() -> GeoCoordinate {
        GeoCoordinate::new(41.503081, -81.58916).unwrap()
    }

    fn barrow() -> GeoCoordinate {
        GeoCoordinate::new(71.244355, -81.914062).unwrap()
    }

    fn may_21_2017() -> JulianDay {
        JulianDay::from_calendar_date(2017, 5, 21)
    }

    #[test]
    fn refined_sunrise_in_cleveland() {
        let utc = event_minutes_utc(HorizonEvent::Sunrise, may_21_2017(), &cleveland())
            .minutes()
            .expect("sunrise");
        // 06:01:40 EDT = 10:01:40 UTC
        assert!((utc - 601.674).abs() < 0.01, "sunrise UTC = {utc} min");
    }

    #[test]
    fn refinement_moves_the_estimate_slightly() {
        let raw = sunrise_set_utc(HorizonEvent::Sunset, may_21_2017(), &cleveland())
            .minutes()
            .unwrap();
        let refined = event_minutes_utc(HorizonEvent::Sunset, may_21_2017(), &cleveland())
            .minutes()
            .unwrap();
        assert!(raw != refined);
        assert!((raw - refined).abs() < 1.0, "raw {raw}, refined {refined}");
    }

    #[test]
    fn midnight_sun_has_no_solution() {
        assert_eq!(
            event_minutes_utc(HorizonEvent::Sunrise, may_21_2017(), &barrow()),
            EventOutcome::NotFound
        );
        assert_eq!(EventOutcome::NotFound.minutes(), None);
    }

    #[test]
    fn regime_thresholds_are_exclusive() {
        use PolarRegime::*;
        assert_eq!(polar_regime(70.0, 79.0), PolarNight);
        assert_eq!(polar_regime(70.0, 80.0), PolarDay);
        assert_eq!(polar_regime(70.0, 266.0), PolarDay);
        assert_eq!(polar_regime(70.0, 267.0), PolarNight);
        assert_eq!(polar_regime(66.4, 172.0), PolarNight);
        assert_eq!(polar_regime(66.41, 172.0), PolarDay);

        assert_eq!(polar_regime(-70.0, 82.0), PolarDay);
        assert_eq!(polar_regime(-70.0, 83.0), PolarNight);
        assert_eq!(polar_regime(-70.0, 263.0), PolarNight);
        assert_eq!(polar_regime(-70.0, 264.0), PolarDay);
        assert_eq!(polar_regime(-66.4, 1.0), PolarNight);
    }

    #[test]
    fn direction_policy() {
        use HorizonEvent::*;
        use PolarRegime::*;
        use SearchDirection::*;
        assert_eq!(search_direction(PolarDay, Sunrise), Backward);
        assert_eq!(search_direction(PolarDay, Sunset), Forward);
        assert_eq!(search_direction(PolarNight, Sunrise), Forward);
        assert_eq!(search_direction(PolarNight, Sunset), Backward);
    }

    #[test]
    fn fallback_search_finds_edges_of_midnight_sun() {
        let rise = nearest_event_day(
            HorizonEvent::Sunrise,
            SearchDirection::Backward,
            may_21_2017(),
            &barrow(),
            -6.0,
            366,
        )
        .unwrap();
        let date = rise.to_calendar_date();
        assert_eq!((date.year, date.month, date.day), (2017, 5, 10));

        let set = nearest_event_day(
            HorizonEvent::Sunset,
            SearchDirection::Forward,
            may_21_2017(),
            &barrow(),
            -6.0,
            366,
        )
        .unwrap();
        let date = set.to_calendar_date();
        assert_eq!((date.year, date.month, date.day), (2017, 8, 2));
    }

    #[test]
    fn local_wrap_moves_the_reported_day() {
        // Same search with EDT: the local times wrap past midnight and the
        // reported days shift by one.
        let rise = nearest_event_day(
            HorizonEvent::Sunrise,
            SearchDirection::Backward,
            may_21_2017(),
            &barrow(),
            -4.0,
            366,
        )
        .unwrap();
        assert_eq!(rise.to_calendar_date().day, 11);
    }

    #[test]
    fn search_is_bounded() {
        let pole = GeoCoordinate::new(90.0, 0.0).unwrap();
        let err = nearest_event_day(
            HorizonEvent::Sunset,
            SearchDirection::Forward,
            may_21_2017(),
            &pole,
            0.0,
            10,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SolarError::SearchExhausted {
                event: HorizonEvent::Sunset,
                days: 10
            }
        );
        assert_eq!(
            err.to_string(),
            "no sunset found within 10 days of the requested date"
        );
    }

    #[test]
    fn wrapping_terminates_for_huge_longitudes() {
        // Unvalidated coordinate: the day wrap must not iterate per day.
        let coord = GeoCoordinate {
            latitude: 10.0,
            longitude: 1e300,
        };
        let noon = solar_noon_minutes(may_21_2017(), coord.longitude, 0.0);
        assert!((0.0..1440.0).contains(&noon), "noon = {noon}");

        let day = nearest_event_day(
            HorizonEvent::Sunrise,
            SearchDirection::Forward,
            may_21_2017(),
            &coord,
            0.0,
            0,
        )
        .unwrap();
        assert!(day.value().is_finite());
    }

    #[test]
    fn solar_noon_is_wrapped_into_one_day() {
        let noon = solar_noon_minutes(may_21_2017(), -81.58916, -4.0);
        // 13:22:59 EDT
        assert!((noon - 802.99).abs() < 0.02, "noon = {noon} min");

        // Far-east offset pushes the raw value past midnight.
        let wrapped = solar_noon_minutes(may_21_2017(), -81.58916, 14.0);
        assert!((0.0..1440.0).contains(&wrapped));
        assert!((wrapped - (noon + 18.0 * 60.0 - 1440.0)).abs() < 1e-9);
    }
}
