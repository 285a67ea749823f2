// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location.

use qtty::Degrees;

use crate::error::SolarError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geographic coordinate of the observer, in decimal degrees.
///
/// Latitude is north-positive, longitude east-positive.  Both ranges are
/// checked on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeoCoordinate"))]
pub struct GeoCoordinate {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

/// Unchecked wire form; deserialization goes through [`GeoCoordinate::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGeoCoordinate {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoCoordinate> for GeoCoordinate {
    type Error = SolarError;

    fn try_from(raw: RawGeoCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoCoordinate {
    /// Rejects latitude outside `[-90, 90]`, longitude outside `[-180, 180]`,
    /// and NaN for either.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SolarError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SolarError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SolarError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        Degrees::new(self.latitude)
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        Degrees::new(self.longitude)
    }
}
