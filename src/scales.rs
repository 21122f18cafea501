// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.
//!
//! The terminator only needs two axes: the absolute **Julian Day** and the
//! Unix day count it is derived from. Civil UTC is mapped onto the Julian
//! Day axis directly (no ΔT, no leap seconds), which is the approximation the
//! low-precision solar ephemeris in [`crate::sun`] is built on.
//!
//! | Marker | Description | Epoch (JD) |
//! |--------|-------------|------------|
//! | [`JD`] | Julian Date | 0.0 |
//! | [`UnixTime`] | Days since 1970-01-01 | 2 440 587.5 |

use crate::instant::TimeScale;
use qtty::Days;

/// Julian Date — the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_julian_day(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_julian_day(jd: Days) -> Days {
        jd
    }
}

/// Unix Time — days elapsed since 1970-01-01T00:00:00 UTC.
///
/// Leap seconds are ignored, as POSIX does.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UnixTime;

/// JD of the Unix epoch (1970-01-01T00:00:00Z).
const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

impl TimeScale for UnixTime {
    const LABEL: &'static str = "Unix";

    #[inline(always)]
    fn to_julian_day(value: Days) -> Days {
        value + UNIX_EPOCH_JD
    }

    #[inline(always)]
    fn from_julian_day(jd: Days) -> Days {
        jd - UNIX_EPOCH_JD
    }
}
