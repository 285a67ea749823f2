// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # NOAA solar-position model
//!
//! Closed-form expressions for the Sun's apparent position, each a pure
//! function of the Julian century `T` ([`JulianDay::julian_centuries`]).
//! The series are the truncated VSOP87-derived terms published by NOAA's
//! Global Monitoring Laboratory (after Meeus, *Astronomical Algorithms*
//! ch. 25).
//!
//! All angles are in **degrees** unless stated otherwise; they are converted
//! to radians only at the call to a trigonometric primitive.
//!
//! [`JulianDay::julian_centuries`]: crate::JulianDay::julian_centuries

use qtty::Centuries;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Zenith of the Sun's centre at apparent sunrise/sunset: 90° plus 34′ of
/// standard refraction plus 16′ of solar semi-diameter.
pub const SUNRISE_ZENITH_DEG: f64 = 90.833;

/// Geometric mean longitude of the Sun, normalised into `[0, 360)`.
pub fn geom_mean_longitude(t: Centuries) -> f64 {
    let t = t.value();
    let l0 = (280.46646 + t * (36000.76983 + t * 0.0003032)).rem_euclid(360.0);
    if l0 < 360.0 {
        l0
    } else {
        0.0
    }
}

/// Geometric mean anomaly of the Sun. Not normalised.
pub fn geom_mean_anomaly(t: Centuries) -> f64 {
    let t = t.value();
    357.52911 + t * (35999.05029 - 0.0001537 * t)
}

/// Eccentricity of Earth's orbit (unitless).
pub fn eccentricity(t: Centuries) -> f64 {
    let t = t.value();
    0.016708634 - t * (0.000042037 + 0.0000001267 * t)
}

/// Equation of centre: three harmonics of the mean anomaly.
pub fn equation_of_center(t: Centuries) -> f64 {
    let m = geom_mean_anomaly(t).to_radians();
    let t = t.value();
    m.sin() * (1.914602 - t * (0.004817 + 0.000014 * t))
        + (2.0 * m).sin() * (0.019993 - 0.000101 * t)
        + (3.0 * m).sin() * 0.000289
}

pub fn true_longitude(t: Centuries) -> f64 {
    geom_mean_longitude(t) + equation_of_center(t)
}

pub fn true_anomaly(t: Centuries) -> f64 {
    geom_mean_anomaly(t) + equation_of_center(t)
}

/// Sun–Earth distance in astronomical units.
pub fn radius_vector(t: Centuries) -> f64 {
    let v = true_anomaly(t).to_radians();
    let e = eccentricity(t);
    (1.000001018 * (1.0 - e * e)) / (1.0 + e * v.cos())
}

/// Longitude of the Moon's ascending node, simplified (degrees).
#[inline]
fn omega(t: Centuries) -> f64 {
    125.04 - 1934.136 * t.value()
}

/// Apparent longitude: true longitude corrected for nutation and aberration.
pub fn apparent_longitude(t: Centuries) -> f64 {
    true_longitude(t) - 0.00569 - 0.00478 * omega(t).to_radians().sin()
}

/// Mean obliquity of the ecliptic.
pub fn mean_obliquity(t: Centuries) -> f64 {
    let t = t.value();
    let seconds = 21.448 - t * (46.8150 + t * (0.00059 - t * 0.001813));
    23.0 + (26.0 + seconds / 60.0) / 60.0
}

/// Obliquity corrected for nutation.
pub fn obliquity_correction(t: Centuries) -> f64 {
    mean_obliquity(t) + 0.00256 * omega(t).to_radians().cos()
}

/// Right ascension in `(-180, 180]`.
pub fn right_ascension(t: Centuries) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();
    (epsilon.cos() * lambda.sin()).atan2(lambda.cos()).to_degrees()
}

pub fn declination(t: Centuries) -> f64 {
    let epsilon = obliquity_correction(t).to_radians();
    let lambda = apparent_longitude(t).to_radians();
    (epsilon.sin() * lambda.sin()).asin().to_degrees()
}

/// Equation of time in **minutes of time** (apparent minus mean solar time).
pub fn equation_of_time(t: Centuries) -> f64 {
    let epsilon = obliquity_correction(t);
    let l0 = geom_mean_longitude(t).to_radians();
    let e = eccentricity(t);
    let m = geom_mean_anomaly(t).to_radians();

    let y = (epsilon.to_radians() / 2.0).tan().powi(2);

    let e_time = y * (2.0 * l0).sin() - 2.0 * e * m.sin()
        + 4.0 * e * y * m.sin() * (2.0 * l0).cos()
        - 0.5 * y * y * (4.0 * l0).sin()
        - 1.25 * e * e * (2.0 * m).sin();
    e_time.to_degrees() * 4.0
}

/// Hour angle of sunrise, in **radians** (negate for sunset).
///
/// Returns `None` when the cosine argument leaves `[-1, 1]`: the Sun does
/// not cross the horizon on that day at that latitude.
pub fn hour_angle_sunrise(latitude_deg: f64, declination_deg: f64) -> Option<f64> {
    let lat = latitude_deg.to_radians();
    let dec = declination_deg.to_radians();
    let cos_h = SUNRISE_ZENITH_DEG.to_radians().cos() / (lat.cos() * dec.cos())
        - lat.tan() * dec.tan();
    (-1.0..=1.0).contains(&cos_h).then(|| cos_h.acos())
}

/// Equatorial coordinates of the Sun at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunCoordinates {
    /// Degrees.
    pub right_ascension: f64,
    /// Degrees.
    pub declination: f64,
    /// Astronomical units.
    pub radius_vector: f64,
    /// Minutes of time.
    pub equation_of_time: f64,
}

/// Evaluates the position model once for `t`.
pub fn sun_coordinates(t: Centuries) -> SunCoordinates {
    SunCoordinates {
        right_ascension: right_ascension(t),
        declination: declination(t),
        radius_vector: radius_vector(t),
        equation_of_time: equation_of_time(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JulianDay;

    /// 2017-05-21 0h UT.
    fn t_2017_05_21() -> Centuries {
        JulianDay::new(2_457_894.5).julian_centuries()
    }

    #[test]
    fn mean_longitude_is_normalised() {
        for &t in &[-2.0, -0.5, 0.0, 0.17, 1.0, 3.3, -1e290, 1e290] {
            let l0 = geom_mean_longitude(Centuries::new(t));
            assert!((0.0..360.0).contains(&l0), "L0 = {l0} at T = {t}");
        }
        assert!((geom_mean_longitude(Centuries::new(0.0)) - 280.46646).abs() < 1e-12);
    }

    #[test]
    fn anomaly_is_not_normalised() {
        assert!(geom_mean_anomaly(Centuries::new(1.0)) > 360.0);
    }

    #[test]
    fn eccentricity_at_j2000() {
        assert!((eccentricity(Centuries::new(0.0)) - 0.016708634).abs() < 1e-15);
    }

    #[test]
    fn obliquity_near_23_44() {
        let eps0 = mean_obliquity(Centuries::new(0.0));
        assert!((eps0 - 23.439291).abs() < 1e-6, "ε0 = {eps0}");
        let eps = obliquity_correction(t_2017_05_21());
        assert!((eps - 23.4).abs() < 0.1, "ε = {eps}");
    }

    #[test]
    fn late_may_declination_and_equation_of_time() {
        let t = t_2017_05_21();
        let dec = declination(t);
        assert!((dec - 20.1).abs() < 0.2, "δ = {dec}");
        let eot = equation_of_time(t);
        assert!((eot - 3.5).abs() < 0.3, "EoT = {eot} min");
    }

    #[test]
    fn equation_of_time_in_early_november_peaks() {
        let t = JulianDay::from_calendar_date(2017, 11, 3).julian_centuries();
        let eot = equation_of_time(t);
        assert!((eot - 16.4).abs() < 0.3, "EoT = {eot} min");
    }

    #[test]
    fn radius_vector_near_aphelion_and_perihelion() {
        let jul = radius_vector(JulianDay::from_calendar_date(2017, 7, 3).julian_centuries());
        let jan = radius_vector(JulianDay::from_calendar_date(2017, 1, 4).julian_centuries());
        assert!((jul - 1.0167).abs() < 1e-3, "R(Jul) = {jul}");
        assert!((jan - 0.9833).abs() < 1e-3, "R(Jan) = {jan}");
    }

    #[test]
    fn right_ascension_consistent_with_longitude() {
        let t = t_2017_05_21();
        let ra = right_ascension(t);
        let lambda = apparent_longitude(t);
        // Near 60° longitude, RA trails longitude by a couple of degrees.
        assert!(ra > 0.0 && ra < lambda, "α = {ra}, λ = {lambda}");
        assert!((lambda - ra) < 3.0);
    }

    #[test]
    fn hour_angle_in_and_out_of_domain() {
        let ha = hour_angle_sunrise(0.0, 0.0).expect("equator at equinox");
        assert!((ha.to_degrees() - 90.833).abs() < 1e-9);

        assert!(hour_angle_sunrise(71.244355, 20.1).is_none(), "midnight sun");
        assert!(hour_angle_sunrise(71.244355, -20.1).is_none(), "polar night");
        assert!(hour_angle_sunrise(90.0, 0.0).is_none());
        assert!(hour_angle_sunrise(41.5, 20.1).is_some());
    }

    #[test]
    fn snapshot_matches_individual_functions() {
        let t = t_2017_05_21();
        let c = sun_coordinates(t);
        assert_eq!(c.declination, declination(t));
        assert_eq!(c.right_ascension, right_ascension(t));
        assert_eq!(c.radius_vector, radius_vector(t));
        assert_eq!(c.equation_of_time, equation_of_time(t));
    }
}
