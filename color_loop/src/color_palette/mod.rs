// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Immutable color loops.
//!
//! ## Organization:
//! - `palette_config` - [`PaletteConfig`], the random generation options, and defaults
//! - `random_color` - [`RandomColorGenerator`]
//! - `palette_struct` - [`ColorPalette`] and its derivation operations

// Attach sources.
pub mod palette_config;
pub mod palette_struct;
pub mod random_color;

// Re-export.
pub use palette_config::*;
pub use palette_struct::*;
pub use random_color::*;
