// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day/night terminator polygon.
//!
//! For every whole degree of longitude the terminator latitude follows from
//! the Sun's hour angle and declination:
//!
//! ```text
//! HA  = (GMST + lng / 15) · 15 − α
//! lat = atan(−cos HA / tan δ)
//! ```
//!
//! The 361 meridian samples (−180° … +180°) are closed over the pole that
//! lies in darkness, so the resulting ring always encloses the night side:
//! the north pole when δ < 0, the south pole otherwise.
//!
//! [`terminator_at`] is the pure computation. [`SolarTerminator`] wraps it
//! for a host map: it owns a [`PolygonSurface`], remembers the instant it
//! was computed for, and pushes a fresh ring whenever that instant changes.

use chrono::{DateTime, Timelike, Utc};
use log::{debug, trace, warn};

use crate::instant::Time;
use crate::location::Location;
use crate::scales::JD;
use crate::sun::{hour_angle, terminator_latitude, EquatorialPosition};
use crate::surface::{ModuleHost, PolygonOptions, PolygonSurface};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Name announced to a [`ModuleHost`] by [`SolarTerminator::register`].
pub const MODULE_NAME: &str = "SolarTerminatorModule";

/// Number of meridian samples: one per degree from −180 to +180 inclusive.
const MERIDIAN_SAMPLES: usize = 361;

// ═══════════════════════════════════════════════════════════════════════════
// TerminatorPolygon
// ═══════════════════════════════════════════════════════════════════════════

/// Closed ring enclosing the night hemisphere.
///
/// Layout: `[pole@-180, sample(-180), sample(-179), …, sample(180), pole@180]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TerminatorPolygon {
    locations: Vec<Location>,
}

impl TerminatorPolygon {
    /// Total vertex count: the meridian samples plus two closing vertices.
    pub const LEN: usize = MERIDIAN_SAMPLES + 2;

    /// All vertices in ring order.
    #[inline]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// The per-degree terminator samples, without the closing vertices.
    pub fn meridian_samples(&self) -> &[Location] {
        &self.locations[1..self.locations.len() - 1]
    }

    /// Latitude of the two closing vertices: `90.0` or `-90.0`.
    pub fn closing_latitude(&self) -> f64 {
        self.locations[0].latitude
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Location> {
        self.locations.iter()
    }

    pub fn into_locations(self) -> Vec<Location> {
        self.locations
    }
}

impl<'a> IntoIterator for &'a TerminatorPolygon {
    type Item = &'a Location;
    type IntoIter = std::slice::Iter<'a, Location>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Pure computation
// ═══════════════════════════════════════════════════════════════════════════

/// Terminator ring and solar equatorial position at `date_time`.
///
/// Deterministic: the same instant always yields bit-identical output.
pub fn terminator_at(date_time: DateTime<Utc>) -> (TerminatorPolygon, EquatorialPosition) {
    let jd = Time::<JD>::from_utc(date_time);
    let gmst = jd.gmst();
    let sun = EquatorialPosition::at(jd);

    let pole = if sun.delta.value() < 0.0 { 90.0 } else { -90.0 };

    let mut locations = Vec::with_capacity(TerminatorPolygon::LEN);
    locations.push(Location::new(pole, -180.0));
    for i in 0..MERIDIAN_SAMPLES {
        let lng = i as f64 - 180.0;
        let ha = hour_angle(lng, &sun, gmst);
        locations.push(Location::new(terminator_latitude(ha, &sun), lng));
    }
    locations.push(Location::new(pole, 180.0));

    debug!(
        "terminator at {date_time}: {jd}, gmst={} h, alpha={} deg, delta={} deg",
        gmst.value(),
        sun.alpha.value(),
        sun.delta.value()
    );
    if sun.delta.value() == 0.0 {
        debug!("declination is exactly zero; terminator runs through the poles");
    }
    let non_finite = locations.iter().filter(|l| !l.is_finite()).count();
    if non_finite > 0 {
        warn!("terminator at {date_time} has {non_finite} non-finite latitude(s)");
    }

    (TerminatorPolygon { locations }, sun)
}

/// Longitude of the sub-solar point from the UTC time of day.
///
/// Ignores the equation of time: local noon is assumed to fall at 12:00 UTC
/// on the prime meridian.
pub fn sub_solar_longitude(date_time: DateTime<Utc>) -> f64 {
    let hours = date_time.hour() as f64
        + date_time.minute() as f64 / 60.0
        + date_time.second() as f64 / 3_600.0
        + date_time.nanosecond() as f64 / 3.6e12;
    180.0 - hours / 24.0 * 360.0
}

// ═══════════════════════════════════════════════════════════════════════════
// SolarTerminator
// ═══════════════════════════════════════════════════════════════════════════

/// Night-side overlay bound to a host polygon.
#[derive(Debug)]
pub struct SolarTerminator<P: PolygonSurface> {
    surface: P,
    options: PolygonOptions,
    date_time: DateTime<Utc>,
    polygon: TerminatorPolygon,
    sun: EquatorialPosition,
}

impl<P: PolygonSurface> SolarTerminator<P> {
    /// Name announced to a [`ModuleHost`].
    pub const MODULE_NAME: &'static str = MODULE_NAME;

    /// Build the overlay and draw it for `date_time` (now when `None`).
    ///
    /// `options` defaults to [`PolygonOptions::default`].
    pub fn new(
        mut surface: P,
        date_time: Option<DateTime<Utc>>,
        options: Option<PolygonOptions>,
    ) -> Self {
        let options = options.unwrap_or_default();
        let date_time = date_time.unwrap_or_else(Utc::now);
        let (polygon, sun) = terminator_at(date_time);

        surface.set_options(&options);
        surface.set_locations(polygon.locations());

        Self {
            surface,
            options,
            date_time,
            polygon,
            sun,
        }
    }

    /// Recompute the ring for `at` (now when `None`) and push it to the
    /// surface. A repeated instant reuses the cached ring.
    pub fn compute_terminator(&mut self, at: Option<DateTime<Utc>>) -> &TerminatorPolygon {
        let at = at.unwrap_or_else(Utc::now);
        self.update(at);
        &self.polygon
    }

    /// Move the overlay to `date_time`, replacing the surface geometry.
    pub fn set_date_time(&mut self, date_time: DateTime<Utc>) {
        self.update(date_time);
    }

    /// Instant the current ring was computed for.
    #[inline]
    pub fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }

    /// Geographic point with the Sun at the zenith.
    ///
    /// Latitude is the cached declination; longitude comes from the UTC time
    /// of day (see [`sub_solar_longitude`]).
    pub fn sun_location(&self) -> Location {
        Location::new(self.sun.delta.value(), sub_solar_longitude(self.date_time))
    }

    /// Cached equatorial position of the Sun.
    #[inline]
    pub fn sun_position(&self) -> EquatorialPosition {
        self.sun
    }

    #[inline]
    pub fn polygon(&self) -> &TerminatorPolygon {
        &self.polygon
    }

    #[inline]
    pub fn options(&self) -> &PolygonOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PolygonOptions) {
        self.surface.set_options(&options);
        self.options = options;
    }

    #[inline]
    pub fn surface(&self) -> &P {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    pub fn into_surface(self) -> P {
        self.surface
    }

    /// Announce this overlay to the host runtime.
    pub fn register<H: ModuleHost + ?Sized>(&self, host: &mut H) {
        host.module_loaded(Self::MODULE_NAME);
    }

    fn update(&mut self, date_time: DateTime<Utc>) {
        if date_time == self.date_time {
            trace!("terminator for {date_time} is cached");
        } else {
            let (polygon, sun) = terminator_at(date_time);
            self.date_time = date_time;
            self.polygon = polygon;
            self.sun = sun;
        }
        self.surface.set_locations(self.polygon.locations());
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{ModuleRegistry, VecSurface};
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn bits(polygon: &TerminatorPolygon) -> Vec<(u64, u64)> {
        polygon
            .iter()
            .map(|l| (l.latitude.to_bits(), l.longitude.to_bits()))
            .collect()
    }

    #[test]
    fn ring_has_samples_plus_two_closing_vertices() {
        let (polygon, _) = terminator_at(utc(2024, 5, 1, 8, 30, 0));
        assert_eq!(polygon.len(), TerminatorPolygon::LEN);
        assert_eq!(polygon.len(), 363);
        assert_eq!(polygon.meridian_samples().len(), 361);
    }

    #[test]
    fn sample_longitudes_step_one_degree() {
        let (polygon, _) = terminator_at(utc(2019, 11, 3, 17, 0, 0));
        for (i, loc) in polygon.meridian_samples().iter().enumerate() {
            assert_eq!(loc.longitude, i as f64 - 180.0);
        }
    }

    #[test]
    fn closes_over_north_pole_in_northern_winter() {
        let (polygon, sun) = terminator_at(utc(2022, 12, 21, 12, 0, 0));
        assert!(sun.delta.value() < 0.0);
        assert_eq!(polygon.locations()[0], Location::new(90.0, -180.0));
        assert_eq!(polygon.locations()[362], Location::new(90.0, 180.0));
        assert_eq!(polygon.closing_latitude(), 90.0);
    }

    #[test]
    fn closes_over_south_pole_in_northern_summer() {
        let (polygon, sun) = terminator_at(utc(2022, 6, 21, 12, 0, 0));
        assert!(sun.delta.value() > 0.0);
        assert_eq!(polygon.locations()[0], Location::new(-90.0, -180.0));
        assert_eq!(polygon.locations()[362], Location::new(-90.0, 180.0));
    }

    #[test]
    fn same_instant_is_bit_identical() {
        let t = utc(2031, 8, 14, 23, 59, 59);
        let (a, sa) = terminator_at(t);
        let (b, sb) = terminator_at(t);
        assert_eq!(bits(&a), bits(&b));
        assert_eq!(sa.delta.value().to_bits(), sb.delta.value().to_bits());
    }

    #[test]
    fn march_equinox_terminator_is_nearly_a_meridian_circle() {
        let (polygon, sun) = terminator_at(utc(2023, 3, 20, 21, 24, 0));
        assert!(sun.delta.value().abs() < 0.05, "delta {:?}", sun.delta);

        let samples = polygon.meridian_samples();
        assert!(samples.iter().all(|l| l.is_finite()));
        assert!(samples.iter().all(|l| l.latitude.abs() <= 90.0));

        // The great circle crosses the equator twice, half a turn apart.
        let crossings: Vec<f64> = samples
            .windows(2)
            .filter(|w| w[0].latitude.signum() != w[1].latitude.signum())
            .map(|w| w[0].longitude)
            .collect();
        assert_eq!(crossings.len(), 2, "crossings {crossings:?}");
        assert!(((crossings[1] - crossings[0]) - 180.0).abs() <= 1.0);
    }

    #[test]
    fn samples_are_latitudes() {
        let (polygon, _) = terminator_at(utc(2010, 2, 2, 2, 2, 2));
        assert!(polygon
            .meridian_samples()
            .iter()
            .all(|l| (-90.0..=90.0).contains(&l.latitude)));
    }

    #[test]
    fn sub_solar_longitude_from_time_of_day() {
        for day in [1, 10, 20] {
            assert_eq!(sub_solar_longitude(utc(2020, 3, day, 0, 0, 0)), 180.0);
            assert_eq!(sub_solar_longitude(utc(2020, 3, day, 12, 0, 0)), 0.0);
            assert!((sub_solar_longitude(utc(2020, 3, day, 18, 0, 0)) + 90.0).abs() < 1e-9);
        }
        let half_second = Utc.timestamp_opt(43_200, 500_000_000).unwrap();
        assert!((sub_solar_longitude(half_second) + 0.5 / 240.0).abs() < 1e-9);
    }

    #[test]
    fn engine_draws_on_construction() {
        let t = utc(2024, 1, 1, 0, 0, 0);
        let overlay = SolarTerminator::new(VecSurface::new(), Some(t), None);
        assert_eq!(overlay.surface().updates(), 1);
        assert_eq!(overlay.surface().locations(), overlay.polygon().locations());
        assert_eq!(overlay.surface().options(), Some(&PolygonOptions::default()));
        assert_eq!(overlay.date_time(), t);
    }

    #[test]
    fn set_date_time_round_trips_and_redraws() {
        let mut overlay = SolarTerminator::new(VecSurface::new(), Some(utc(2024, 1, 1, 0, 0, 0)), None);
        let before = overlay.polygon().clone();

        let t = utc(2024, 7, 1, 6, 0, 0);
        overlay.set_date_time(t);
        assert_eq!(overlay.date_time(), t);
        assert_eq!(overlay.surface().updates(), 2);
        assert_ne!(overlay.polygon(), &before);
        assert_eq!(overlay.surface().locations(), overlay.polygon().locations());
    }

    #[test]
    fn repeated_instant_reuses_cache_but_still_redraws() {
        let t = utc(2025, 9, 22, 18, 19, 0);
        let mut overlay = SolarTerminator::new(VecSurface::new(), Some(t), None);
        let first = bits(overlay.polygon());
        let again = bits(overlay.compute_terminator(Some(t)));
        assert_eq!(first, again);
        assert_eq!(overlay.surface().updates(), 2);
    }

    #[test]
    fn compute_terminator_without_instant_uses_now() {
        let start = Utc::now();
        let mut overlay = SolarTerminator::new(VecSurface::new(), Some(utc(2001, 1, 1, 0, 0, 0)), None);
        overlay.compute_terminator(None);
        assert!(overlay.date_time() >= start);
        assert_eq!(overlay.polygon().len(), TerminatorPolygon::LEN);
    }

    #[test]
    fn sun_location_tracks_declination_and_time_of_day() {
        let overlay = SolarTerminator::new(VecSurface::new(), Some(utc(2022, 6, 21, 0, 0, 0)), None);
        let sun = overlay.sun_location();
        assert!((sun.latitude - 23.44).abs() < 0.1, "sun {sun}");
        assert!((sun.longitude - 180.0).abs() < 1e-6);
        assert_eq!(sun.latitude, overlay.sun_position().delta.value());
    }

    #[test]
    fn options_are_forwarded_to_surface() {
        let custom = PolygonOptions::from_css("#ff0000", "rgba(0,0,64,0.5)").unwrap();
        let mut overlay = SolarTerminator::new(VecSurface::new(), None, Some(custom.clone()));
        assert_eq!(overlay.options(), &custom);
        assert_eq!(overlay.surface().options(), Some(&custom));

        overlay.set_options(PolygonOptions::default());
        assert_eq!(overlay.surface().options(), Some(&PolygonOptions::default()));
    }

    #[test]
    fn register_announces_module_name() {
        let overlay = SolarTerminator::new(VecSurface::new(), None, None);
        let mut registry = ModuleRegistry::new();
        overlay.register(&mut registry);
        assert!(registry.is_loaded("SolarTerminatorModule"));
    }
}
