// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar Calculations
//!
//! Solar noon, sunrise, sunset and the Sun's azimuth/elevation for a
//! location and civil date, using the NOAA solar-position algorithm.
//!
//! # Core types
//!
//! - [`CivilInstant`]: calendar operations, implemented for every
//!   `chrono::DateTime<Tz>`.
//! - [`JulianDay`]: Julian Day arithmetic and calendar conversions.
//! - [`GeoCoordinate`]: validated latitude/longitude.
//! - [`SolarTimes`]: solar noon, sunrise and sunset for one civil day.
//! - [`HorizontalPosition`]: azimuth, elevation and darkness flag.
//! - [`SolarConfig`]: bound on the polar fallback search.
//!
//! # Polar day and night
//!
//! When the Sun does not cross the horizon on the requested day, sunrise and
//! sunset fall back to the nearest day that has one (backwards or forwards
//! depending on the season, see [`events`]).  Those fields then carry local
//! midnight of the day found and the matching `*_fallback` field is set.
//!
//! # Example
//!
//! ```
//! use chrono::{FixedOffset, TimeZone};
//! use solcalc::get_solar_times;
//!
//! let edt = FixedOffset::west_opt(4 * 3600).unwrap();
//! let instant = edt.with_ymd_and_hms(2017, 5, 21, 4, 30, 0).unwrap();
//! let times = get_solar_times(41.503081, -81.58916, &instant).unwrap();
//!
//! assert_eq!(times.sunrise.format("%H:%M:%S").to_string(), "06:01:40");
//! assert!(times.sunrise < times.solar_noon && times.solar_noon < times.sunset);
//! ```
//!
//! The UTC offset of the input instant is held fixed for the whole
//! computation; no timezone database is consulted.

mod config;
mod coordinate;
mod error;
pub mod events;
pub mod format;
mod horizon;
mod instant;
mod julian;
pub mod numeric;
pub mod position;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::SolarConfig;
pub use coordinate::GeoCoordinate;
pub use error::SolarError;
pub use events::{HorizonEvent, PolarFallback, PolarRegime, SearchDirection, SolarTimes};
pub use horizon::{
    azimuth_elevation, refraction_correction, HorizontalPosition, DARK_ZENITH_DEG,
};
pub use instant::CivilInstant;
pub use julian::{is_leap_year, CalendarDate, JulianDay};
pub use position::SunCoordinates;

/// Solar noon, sunrise and sunset on the civil day of `instant`.
///
/// The time of day of `instant` is irrelevant; only its civil date and UTC
/// offset are used.  Fails only on out-of-range coordinates (or, at the
/// exact poles, when no event exists within the default search bound).
pub fn get_solar_times<T: CivilInstant>(
    latitude: f64,
    longitude: f64,
    instant: &T,
) -> Result<SolarTimes<T>, SolarError> {
    get_solar_times_with(&SolarConfig::default(), latitude, longitude, instant)
}

/// [`get_solar_times`] with an explicit configuration.
pub fn get_solar_times_with<T: CivilInstant>(
    config: &SolarConfig,
    latitude: f64,
    longitude: f64,
    instant: &T,
) -> Result<SolarTimes<T>, SolarError> {
    let coord = GeoCoordinate::new(latitude, longitude)?;
    events::solar_times(&coord, instant, config)
}

/// Azimuth and refraction-corrected elevation of the Sun at `instant`.
pub fn get_azimuth_elevation<T: CivilInstant>(
    instant: &T,
    latitude: f64,
    longitude: f64,
) -> Result<HorizontalPosition, SolarError> {
    let coord = GeoCoordinate::new(latitude, longitude)?;
    let t = instant.julian_day().julian_centuries();
    Ok(azimuth_elevation(
        t,
        instant.minutes_since_midnight(),
        &coord,
        instant.utc_offset_hours(),
    ))
}

/// Equatorial coordinates of the Sun at `instant`.
pub fn get_sun_coordinates<T: CivilInstant>(instant: &T) -> SunCoordinates {
    position::sun_coordinates(instant.julian_day().julian_centuries())
}
