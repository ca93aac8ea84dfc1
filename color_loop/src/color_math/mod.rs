// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The color math boundary of the crate.
//!
//! ## Organization:
//! - `color_value` - The [`Color`] type, hex output, CIEDE2000, darken
//! - `color_input` - [`ColorInput`] and parsing of CSS color text (via `colorgrad`)
//! - `interpolation_mode` - The 8 [`InterpolationMode`]s and their rotation order
//! - `color_mix` - Mode aware mixing, and sampling a color loop into a scale
//! - `hsi` - HSI conversion, the one color space without a crate implementation
//!
//! Parsing is done by [`colorgrad`], and every other color space conversion (and the
//! CIEDE2000 metric) is done by the [`palette`] crate.

// Attach sources.
pub mod color_input;
pub mod color_mix;
pub mod color_value;
pub mod hsi;
pub mod interpolation_mode;

// Re-export.
pub use color_input::*;
pub use color_mix::*;
pub use color_value::*;
pub use hsi::*;
pub use interpolation_mode::*;
