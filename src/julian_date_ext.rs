// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use crate::instant::Time;
use crate::scales::JD;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Days elapsed since J2000.0 (negative before it).
    #[inline]
    pub fn days_since_j2000(&self) -> Days {
        *self - Self::J2000
    }

    /// Julian centuries since J2000.0 (used by the obliquity polynomial).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(self.days_since_j2000().value() / Self::JULIAN_CENTURY.value())
    }

    /// Greenwich Mean Sidereal Time, low-precision linear form.
    ///
    /// `GMST = (18.697374558 + 24.06570982441908 · d) mod 24` where `d` is
    /// the number of days since J2000.0 (USNO approximation). The remainder
    /// truncates toward zero, so instants before J2000.0 whose linear term
    /// is negative yield a negative GMST; the hour angle is only ever fed
    /// into periodic functions, so that is harmless.
    #[inline]
    pub fn gmst(&self) -> Hours {
        let d = self.days_since_j2000().value();
        Hours::new((18.697374558 + 24.06570982441908 * d) % 24.0)
    }
}
