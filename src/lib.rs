// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar terminator
//!
//! Computes the line separating day from night on Earth at a given instant,
//! as a closed polygon ready to be handed to a map control, together with
//! the sub-solar point.
//!
//! # Core types
//!
//! - [`SolarTerminator<P>`] — overlay engine bound to a host [`PolygonSurface`].
//! - [`TerminatorPolygon`] — closed ring enclosing the night hemisphere.
//! - [`terminator_at`] — the pure computation behind the engine.
//! - [`EclipticPosition`] / [`EquatorialPosition`] — low-precision solar ephemeris.
//! - [`Time<S>`] — instant parameterised by a [`TimeScale`] marker
//!   ([`JD`], [`UnixTime`]).
//! - [`Location`] — latitude/longitude pair in degrees.
//!
//! # Host integration
//!
//! The crate draws nothing itself. A host implements [`PolygonSurface`] for
//! its polygon primitive (or uses [`VecSurface`] headlessly) and, if it
//! loads overlays lazily, [`ModuleHost`] to receive the readiness signal
//! sent by [`SolarTerminator::register`].
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use solar_terminator::{SolarTerminator, VecSurface};
//!
//! let noon = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
//! let overlay = SolarTerminator::new(VecSurface::new(), Some(noon), None);
//!
//! assert_eq!(overlay.surface().locations().len(), 363);
//! assert!(overlay.sun_location().longitude.abs() < 1e-9);
//! ```

mod error;
pub(crate) mod instant;
mod julian_date_ext;
mod location;
pub(crate) mod scales;
pub mod sun;
mod surface;
mod terminator;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use error::{Error, Result};
pub use instant::{Time, TimeScale};
pub use location::Location;
pub use scales::{UnixTime, JD};
pub use sun::{ecliptic_obliquity, EclipticPosition, EquatorialPosition};
pub use surface::{ModuleHost, ModuleRegistry, PolygonOptions, PolygonSurface, Rgba, VecSurface};
pub use terminator::{
    sub_solar_longitude, terminator_at, SolarTerminator, TerminatorPolygon, MODULE_NAME,
};

/// Julian Date — continuous count of days since the Julian Period.
///
/// Type alias for [`Time<JD>`].
pub type JulianDate = Time<JD>;
