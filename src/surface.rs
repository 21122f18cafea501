// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Seams towards the host map control.
//!
//! The terminator does not draw anything. It owns a [`PolygonSurface`]
//! supplied by the host and replaces its geometry whenever the instant
//! changes. Styling travels alongside as [`PolygonOptions`], and a host that
//! loads overlays lazily is told about readiness through [`ModuleHost`].

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::location::Location;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ═══════════════════════════════════════════════════════════════════════════
// Host traits
// ═══════════════════════════════════════════════════════════════════════════

/// A polygon primitive provided by the host rendering surface.
pub trait PolygonSurface {
    /// Replace the polygon's ring with `locations`.
    fn set_locations(&mut self, locations: &[Location]);

    /// Apply fill/stroke styling. Hosts without styling may ignore it.
    fn set_options(&mut self, _options: &PolygonOptions) {}
}

/// Host runtime that wants to know when an overlay module is ready.
pub trait ModuleHost {
    fn module_loaded(&mut self, name: &str);
}

// ═══════════════════════════════════════════════════════════════════════════
// In-memory implementations
// ═══════════════════════════════════════════════════════════════════════════

/// Surface that simply keeps the last ring and styling it was given.
///
/// Useful for headless rendering (export to GeoJSON, SVG, …) and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VecSurface {
    locations: Vec<Location>,
    options: Option<PolygonOptions>,
    updates: usize,
}

impl VecSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn options(&self) -> Option<&PolygonOptions> {
        self.options.as_ref()
    }

    /// Number of times the ring has been replaced.
    pub fn updates(&self) -> usize {
        self.updates
    }
}

impl PolygonSurface for VecSurface {
    fn set_locations(&mut self, locations: &[Location]) {
        self.locations.clear();
        self.locations.extend_from_slice(locations);
        self.updates += 1;
    }

    fn set_options(&mut self, options: &PolygonOptions) {
        self.options = Some(options.clone());
    }
}

/// Set of module names announced so far.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    loaded: Vec<String>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.iter().any(|m| m == name)
    }
}

impl ModuleHost for ModuleRegistry {
    fn module_loaded(&mut self, name: &str) {
        if !self.is_loaded(name) {
            log::debug!("module {name} loaded");
            self.loaded.push(name.to_owned());
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Colours
// ═══════════════════════════════════════════════════════════════════════════

/// An sRGB colour with straight alpha in `[0, 1]`.
///
/// Parses the CSS notations map controls accept (`#rgb`, `#rgba`, `#rrggbb`,
/// `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)`) and prints back as
/// `rgba(r,g,b,a)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    fn parse_hex(input: &str, digits: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidColor {
            input: input.to_owned(),
            reason,
        };
        if !digits.is_ascii() || !matches!(digits.len(), 3 | 4 | 6 | 8) {
            return Err(invalid("expected 3, 4, 6 or 8 hex digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("bad hex digit"));
        }
        // Shorthand forms repeat each nibble: `#f80` is `#ff8800`.
        let width = if digits.len() <= 4 { 1 } else { 2 };
        let channels = (0..digits.len())
            .step_by(width)
            .map(|i| {
                let value = u8::from_str_radix(&digits[i..i + width], 16)
                    .map_err(|_| invalid("bad hex digit"))?;
                Ok(if width == 1 { value * 0x11 } else { value })
            })
            .collect::<Result<Vec<u8>>>()?;
        let a = channels.get(3).map_or(1.0, |&a| a as f64 / 255.0);
        Ok(Self::new(channels[0], channels[1], channels[2], a))
    }

    fn parse_functional(input: &str, args: &str, with_alpha: bool) -> Result<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(Error::InvalidColor {
                input: input.to_owned(),
                reason: if with_alpha {
                    "rgba() takes four components"
                } else {
                    "rgb() takes three components"
                },
            });
        }

        let number = |s: &str| {
            s.parse::<f64>().map_err(|_| Error::InvalidColor {
                input: input.to_owned(),
                reason: "component is not a number",
            })
        };
        let channel = |name: &'static str, s: &str| -> Result<u8> {
            let value = number(s)?;
            if !(0.0..=255.0).contains(&value) {
                return Err(Error::ChannelOutOfRange {
                    channel: name,
                    value,
                });
            }
            Ok(value.round() as u8)
        };

        let r = channel("red", parts[0])?;
        let g = channel("green", parts[1])?;
        let b = channel("blue", parts[2])?;
        let a = if with_alpha {
            let a = number(parts[3])?;
            if !(0.0..=1.0).contains(&a) {
                return Err(Error::ChannelOutOfRange {
                    channel: "alpha",
                    value: a,
                });
            }
            a
        } else {
            1.0
        };
        Ok(Self::new(r, g, b, a))
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let s = input.trim();
        if let Some(digits) = s.strip_prefix('#') {
            return Self::parse_hex(input, digits);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_functional(input, args, true);
        }
        if let Some(args) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_functional(input, args, false);
        }
        Err(Error::InvalidColor {
            input: input.to_owned(),
            reason: "expected #hex, rgb() or rgba()",
        })
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Rgba {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Polygon styling
// ═══════════════════════════════════════════════════════════════════════════

/// Fill and stroke styling for the night-side polygon.
///
/// The default is an invisible outline over a 70 % black fill.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PolygonOptions {
    pub stroke_color: Rgba,
    pub fill_color: Rgba,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::TRANSPARENT,
            fill_color: Rgba::new(0, 0, 0, 0.7),
        }
    }
}

impl PolygonOptions {
    /// Build options from CSS colour strings.
    pub fn from_css(stroke_color: &str, fill_color: &str) -> Result<Self> {
        Ok(Self {
            stroke_color: stroke_color.parse()?,
            fill_color: fill_color.parse()?,
        })
    }

    /// Decode options from a JSON object such as
    /// `{"strokeColor": "rgba(0,0,0,0)", "fillColor": "#00000080"}`.
    /// Missing keys fall back to the defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
