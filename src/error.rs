// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Errors raised while reading overlay configuration.
//!
//! The geometry itself never fails; only styling input supplied by a host
//! (CSS colour strings, JSON option blobs) can be rejected.

use thiserror::Error;

/// Result alias for fallible configuration calls.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a recognised colour notation.
    #[error("invalid colour {input:?}: {reason}")]
    InvalidColor { input: String, reason: &'static str },

    /// A colour channel parsed but lies outside its valid range.
    #[error("colour channel {channel} out of range: {value}")]
    ChannelOutOfRange { channel: &'static str, value: f64 },

    /// Polygon options could not be decoded from JSON.
    #[cfg(feature = "serde")]
    #[error("invalid polygon options: {0}")]
    Json(#[from] serde_json::Error),
}
