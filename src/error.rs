// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible entry point.

use crate::events::HorizonEvent;
use thiserror::Error;

/// Errors returned by the public API.
///
/// The hour-angle equation having no solution on a given day is *not* an
/// error: it is handled internally by the polar fallback search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolarError {
    #[error("latitude {0}° is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0}° is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// The polar fallback search stepped `days` days without the sun
    /// crossing the horizon.
    #[error("no {event} found within {days} days of the requested date")]
    SearchExhausted { event: HorizonEvent, days: u32 },

    /// A derived instant fell outside chrono's representable range.
    #[error("civil instant out of representable range")]
    InstantOutOfRange,
}
