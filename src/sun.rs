// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-precision position of the Sun.
//!
//! The formulas follow the "Position of the Sun" approximation (mean
//! longitude, mean anomaly, two-term equation of centre) and the short-term
//! polynomial for the obliquity of the ecliptic. Accuracy is around 0.01°,
//! which is plenty for shading the night side of a map.
//!
//! All angles enter and leave this module in degrees; trigonometry is done
//! on `f64` radians internally.

use qtty::{Degrees, Hours};

use crate::instant::Time;
use crate::scales::JD;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of the Sun in ecliptic coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EclipticPosition {
    /// Apparent ecliptic longitude λ.
    #[cfg_attr(feature = "serde", serde(with = "degrees_serde"))]
    pub lambda: Degrees,
    /// Earth–Sun distance in astronomical units. Not used by the terminator.
    pub r: f64,
}

/// Position of the Sun in equatorial coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquatorialPosition {
    /// Right ascension α, kept in the same quadrant as λ.
    #[cfg_attr(feature = "serde", serde(with = "degrees_serde"))]
    pub alpha: Degrees,
    /// Declination δ.
    #[cfg_attr(feature = "serde", serde(with = "degrees_serde"))]
    pub delta: Degrees,
}

impl EclipticPosition {
    /// Ecliptic position of the Sun at Julian Day `jd`.
    pub fn at(jd: Time<JD>) -> Self {
        let n = jd.days_since_j2000().value();

        // mean longitude
        let l = (280.460 + 0.9856474 * n) % 360.0;
        // mean anomaly
        let g = ((357.528 + 0.9856003 * n) % 360.0).to_radians();

        let lambda = l + 1.915 * g.sin() + 0.02 * (2.0 * g).sin();
        let r = 1.00014 - 0.01671 * g.cos() - 0.0014 * (2.0 * g).cos();

        Self {
            lambda: Degrees::new(lambda),
            r,
        }
    }
}

/// Obliquity of the ecliptic ε at Julian Day `jd`.
///
/// Fifth-order polynomial in Julian centuries since J2000.0 (Laskar's
/// short-term expression truncated as in most almanac software).
pub fn ecliptic_obliquity(jd: Time<JD>) -> Degrees {
    let t = jd.julian_centuries().value();
    Degrees::new(
        23.43929111
            - t * (46.836769 / 3600.0
                - t * (0.0001831 / 3600.0
                    + t * (0.00200340 / 3600.0 - t * (0.576e-6 / 3600.0 - t * 4.34e-8 / 3600.0)))),
    )
}

impl EquatorialPosition {
    /// Rotate an ecliptic longitude into equatorial coordinates.
    ///
    /// `atan` only covers two quadrants, so α is shifted by whole multiples
    /// of 90° until it sits in the same quadrant as λ.
    pub fn from_ecliptic(lambda: Degrees, obliquity: Degrees) -> Self {
        let lambda = lambda.value();
        let eps = obliquity.value().to_radians();

        let mut alpha = (eps.cos() * lambda.to_radians().tan()).atan().to_degrees();
        let delta = (eps.sin() * lambda.to_radians().sin()).asin().to_degrees();

        let lambda_quadrant = (lambda / 90.0).floor() * 90.0;
        let alpha_quadrant = (alpha / 90.0).floor() * 90.0;
        alpha += lambda_quadrant - alpha_quadrant;

        Self {
            alpha: Degrees::new(alpha),
            delta: Degrees::new(delta),
        }
    }

    /// Equatorial position of the Sun at Julian Day `jd`.
    pub fn at(jd: Time<JD>) -> Self {
        let ecliptic = EclipticPosition::at(jd);
        Self::from_ecliptic(ecliptic.lambda, ecliptic_obliquity(jd))
    }
}

/// Hour angle of the Sun seen from geographic longitude `longitude`.
#[inline]
pub fn hour_angle(longitude: f64, sun: &EquatorialPosition, gmst: Hours) -> Degrees {
    Degrees::new((gmst.value() + longitude / 15.0) * 15.0 - sun.alpha.value())
}

/// Latitude at which the terminator crosses the meridian with hour angle `ha`.
///
/// When δ is exactly zero `tan δ` vanishes and the quotient becomes ±∞, so
/// the result is ±90°; if `cos ha` is zero as well the result is NaN.
#[inline]
pub fn terminator_latitude(ha: Degrees, sun: &EquatorialPosition) -> f64 {
    let quotient = -ha.value().to_radians().cos() / sun.delta.value().to_radians().tan();
    quotient.atan().to_degrees()
}

#[cfg(feature = "serde")]
mod degrees_serde {
    use qtty::Degrees;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Degrees, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.value())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Degrees, D::Error> {
        f64::deserialize(deserializer).map(Degrees::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::Days;

    fn jd(value: f64) -> Time<JD> {
        Time::<JD>::new(value)
    }

    #[test]
    fn obliquity_at_j2000_is_the_constant_term() {
        assert_eq!(ecliptic_obliquity(Time::<JD>::J2000).value(), 23.43929111);
    }

    #[test]
    fn obliquity_decreases_slowly() {
        let later = Time::<JD>::J2000 + Days::new(36_525.0);
        let eps = ecliptic_obliquity(later).value();
        assert!(eps < 23.43929111);
        assert!((eps - (23.43929111 - 46.836769 / 3600.0)).abs() < 1e-6);
    }

    #[test]
    fn ecliptic_position_at_j2000() {
        let pos = EclipticPosition::at(Time::<JD>::J2000);
        let g = 357.528_f64.to_radians();
        let expected = 280.460 + 1.915 * g.sin() + 0.02 * (2.0 * g).sin();
        assert_eq!(pos.lambda.value(), expected);
        // Early January: Earth near perihelion.
        assert!(pos.r > 0.9815 && pos.r < 0.9825, "r = {}", pos.r);
    }

    #[test]
    fn declination_is_bounded_by_obliquity() {
        for k in 0..400 {
            let t = jd(2_451_545.0 + k as f64);
            let sun = EquatorialPosition::at(t);
            assert!(sun.delta.value().abs() <= 23.45, "delta {:?}", sun.delta);
        }
    }

    #[test]
    fn right_ascension_follows_ecliptic_quadrant() {
        let eps = Degrees::new(23.44);
        for lambda in [10.0, 100.0, 190.0, 280.0, 370.0] {
            let sun = EquatorialPosition::from_ecliptic(Degrees::new(lambda), eps);
            let lq = (lambda / 90.0_f64).floor();
            let aq = (sun.alpha.value() / 90.0).floor();
            assert_eq!(lq, aq, "lambda {lambda} alpha {:?}", sun.alpha);
        }
    }

    #[test]
    fn june_solstice_declination_near_plus_obliquity() {
        // 2021-06-21 03:32 UTC
        let sun = EquatorialPosition::at(jd(2_459_386.647_2));
        assert!((sun.delta.value() - 23.44).abs() < 0.05, "delta {:?}", sun.delta);
    }

    #[test]
    fn hour_angle_is_linear_in_longitude() {
        let sun = EquatorialPosition {
            alpha: Degrees::new(30.0),
            delta: Degrees::new(10.0),
        };
        let gmst = Hours::new(2.0);
        assert_eq!(hour_angle(0.0, &sun, gmst).value(), 0.0);
        assert_eq!(hour_angle(15.0, &sun, gmst).value(), 15.0);
    }

    #[test]
    fn zero_declination_pins_latitude_to_the_poles() {
        let sun = EquatorialPosition {
            alpha: Degrees::new(0.0),
            delta: Degrees::new(0.0),
        };
        assert!((terminator_latitude(Degrees::new(0.0), &sun) + 90.0).abs() < 1e-12);
        assert!((terminator_latitude(Degrees::new(180.0), &sun) - 90.0).abs() < 1e-12);
    }
}
