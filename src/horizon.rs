// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instantaneous azimuth and elevation of the Sun.

use qtty::Centuries;

use crate::coordinate::GeoCoordinate;
use crate::numeric::round_to;
use crate::position::{declination, equation_of_time};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Corrected zenith beyond which the sky counts as dark (astronomical twilight).
pub const DARK_ZENITH_DEG: f64 = 108.0;

/// Horizontal coordinates of the Sun, refraction applied.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HorizontalPosition {
    /// Degrees clockwise from north, in `[0, 360)`.
    pub azimuth: f64,
    /// Apparent elevation above the horizon, degrees.
    pub elevation: f64,
    /// Apparent zenith angle, degrees (`90 − elevation`).
    pub zenith: f64,
    /// `true` when the zenith exceeds [`DARK_ZENITH_DEG`].
    pub is_dark: bool,
}

impl HorizontalPosition {
    /// Copy with the angles rounded to a multiple of `10^exp` degrees.
    pub fn rounded(self, exp: i32) -> Self {
        Self {
            azimuth: round_to(self.azimuth, exp),
            elevation: round_to(self.elevation, exp),
            zenith: round_to(self.zenith, exp),
            is_dark: self.is_dark,
        }
    }
}

/// Atmospheric refraction for a geometric elevation, in degrees.
///
/// Piecewise NOAA approximation: none above 85°, a rational polynomial in
/// `tan(e)` above 5°, a quintic in `e` above −0.575°, and `−20.774 / tan(e)`
/// below.
pub fn refraction_correction(elevation_deg: f64) -> f64 {
    if elevation_deg > 85.0 {
        return 0.0;
    }
    let te = elevation_deg.to_radians().tan();
    let arcseconds = if elevation_deg > 5.0 {
        58.1 / te - 0.07 / te.powi(3) + 0.000086 / te.powi(5)
    } else if elevation_deg > -0.575 {
        let e = elevation_deg;
        1735.0 + e * (-518.2 + e * (103.4 + e * (-12.79 + e * 0.711)))
    } else {
        -20.774 / te
    };
    arcseconds / 3600.0
}

/// Sun position at `minutes_local` after local midnight.
///
/// `t` must be the Julian century of that same instant.
pub fn azimuth_elevation(
    t: Centuries,
    minutes_local: f64,
    coord: &GeoCoordinate,
    utc_offset_hours: f64,
) -> HorizontalPosition {
    let eq_time = equation_of_time(t);
    let theta = declination(t).to_radians();
    let lat = coord.latitude.to_radians();

    let time_offset = eq_time + 4.0 * coord.longitude - 60.0 * utc_offset_hours;
    let true_solar_time = (minutes_local + time_offset).rem_euclid(1440.0);
    let hour_angle = true_solar_time / 4.0 - 180.0;

    let cos_zenith = (lat.sin() * theta.sin()
        + lat.cos() * theta.cos() * hour_angle.to_radians().cos())
    .clamp(-1.0, 1.0);
    let zenith = cos_zenith.acos().to_degrees();

    let az_denom = lat.cos() * zenith.to_radians().sin();
    let mut azimuth = if az_denom.abs() > 0.001 {
        let az_rad = ((lat.sin() * zenith.to_radians().cos() - theta.sin()) / az_denom)
            .clamp(-1.0, 1.0);
        let az = 180.0 - az_rad.acos().to_degrees();
        if hour_angle > 0.0 {
            -az
        } else {
            az
        }
    } else if coord.latitude > 0.0 {
        180.0
    } else {
        0.0
    };
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    if azimuth >= 360.0 {
        azimuth -= 360.0;
    }

    let solar_zenith = zenith - refraction_correction(90.0 - zenith);
    HorizontalPosition {
        azimuth,
        elevation: 90.0 - solar_zenith,
        zenith: solar_zenith,
        is_dark: solar_zenith > DARK_ZENITH_DEG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JulianDay;

    fn cleveland() -> GeoCoordinate {
        GeoCoordinate::new(41.503081, -81.58916).unwrap()
    }

    /// Julian century of 2017-05-21 at `minutes` after local EDT midnight.
    fn t_at(minutes: f64) -> Centuries {
        JulianDay::from_calendar_date(2017, 5, 21)
            .add_minutes(minutes + 240.0)
            .julian_centuries()
    }

    #[test]
    fn refraction_regimes() {
        assert_eq!(refraction_correction(89.0), 0.0);
        let high = refraction_correction(45.0);
        assert!((high * 3600.0 - 58.03).abs() < 0.1, "{high}");
        let horizon = refraction_correction(0.0);
        assert!((horizon * 3600.0 - 1735.0).abs() < 1e-9);
        assert!(refraction_correction(-5.0) > 0.0);
        assert!(refraction_correction(4.9) > refraction_correction(10.0));
    }

    #[test]
    fn solar_noon_points_south_at_peak_elevation() {
        // 13:22:59 EDT
        let minutes = 802.99;
        let pos = azimuth_elevation(t_at(minutes), minutes, &cleveland(), -4.0);
        assert!((pos.azimuth - 180.0).abs() < 0.5, "az = {}", pos.azimuth);
        // 90 − 41.5 + 20.2
        assert!((pos.elevation - 68.7).abs() < 0.3, "el = {}", pos.elevation);
        assert!(!pos.is_dark);
    }

    #[test]
    fn morning_sun_is_east_and_evening_sun_is_west() {
        let am = azimuth_elevation(t_at(540.0), 540.0, &cleveland(), -4.0);
        assert!(am.azimuth > 45.0 && am.azimuth < 135.0, "am az = {}", am.azimuth);
        let pm = azimuth_elevation(t_at(1140.0), 1140.0, &cleveland(), -4.0);
        assert!(pm.azimuth > 225.0 && pm.azimuth < 315.0, "pm az = {}", pm.azimuth);
    }

    #[test]
    fn elevation_near_zero_at_sunrise() {
        // 06:01:40 EDT: upper limb on the horizon, centre 0.833° below the
        // geometric horizon, ~0.44° below after refraction.
        let minutes = 361.674;
        let pos = azimuth_elevation(t_at(minutes), minutes, &cleveland(), -4.0);
        assert!((pos.elevation + 0.44).abs() < 0.05, "el = {}", pos.elevation);
    }

    #[test]
    fn midnight_is_dark() {
        let minutes = 60.0;
        let pos = azimuth_elevation(t_at(minutes), minutes, &cleveland(), -4.0);
        assert!(pos.is_dark);
        assert!(pos.elevation < -18.0);
        assert!((0.0..360.0).contains(&pos.azimuth));
    }

    #[test]
    fn rounded_keeps_dark_flag() {
        let pos = HorizontalPosition {
            azimuth: 179.9994,
            elevation: 68.8349,
            zenith: 21.1651,
            is_dark: false,
        };
        let r = pos.rounded(-2);
        assert_eq!(r.azimuth, 180.0);
        assert_eq!(r.elevation, 68.83);
        assert_eq!(r.zenith, 21.17);
        assert!(!r.is_dark);
    }

    #[test]
    fn pole_uses_fixed_azimuth() {
        let pole = GeoCoordinate::new(90.0, 0.0).unwrap();
        let pos = azimuth_elevation(t_at(600.0), 600.0, &pole, 0.0);
        assert_eq!(pos.azimuth, 180.0);
        let south = GeoCoordinate::new(-90.0, 0.0).unwrap();
        let pos = azimuth_elevation(t_at(600.0), 600.0, &south, 0.0);
        assert_eq!(pos.azimuth, 0.0);
    }
}
