// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Cyclic color palettes for animation loops
//!
//! This crate turns a handful of seed colors into a closed color wheel with many
//! interpolated steps, and lets an animation loop (LED strips, generative art, terminal
//! rainbows) sample that wheel by index every frame while the whole wheel cross-fades to
//! a new palette, interpolation mode, or random color set.
//!
//! # Table of contents
//!
//! <!-- TOC -->
//! - [Building blocks](#building-blocks)
//! - [Driving a theme from a frame loop](#driving-a-theme-from-a-frame-loop)
//! - [Transitions](#transitions)
//! - [Subscribing to changes](#subscribing-to-changes)
//! <!-- /TOC -->
//!
//! # Building blocks
//!
//! | Type                       | Mutability | Role                                                     |
//! | :------------------------- | :--------- | :------------------------------------------------------- |
//! | [`Color`]                  | value      | One sRGB color, the currency of the whole crate          |
//! | [`ColorPalette`]           | immutable  | Closed loop of colors + mode + the rendered scale        |
//! | [`RandomColorGenerator`]   | value      | Brightness and CIEDE2000 constrained random colors       |
//! | [`Theme`]                  | mutable    | Active palette, optional target, and the working colors  |
//! | [`SubscriberList`]         | mutable    | Ordered callback registry used by [`Theme`] to publish   |
//!
//! Every [`ColorPalette`] operation returns either the *same* palette (when nothing would
//! change) or a brand new one. Palettes are never mutated in place, so they are cheap to
//! clone and safe to share across threads.
//!
//! # Driving a theme from a frame loop
//!
//! There is no internal timer or scheduler. The caller owns the [`Theme`] and calls
//! [`Theme::tick`] once per animation frame:
//!
//! ```
//! use color_loop::*;
//!
//! let mut theme = Theme::new(ThemeConfig {
//!     initial: InitialThemeColors::Colors(vec!["red".into(), "green".into(), "blue".into()]),
//!     n_steps: 64,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! for led in 0..8 {
//!     let _color = theme.get_color(led * 8, None);
//! }
//! theme.tick(1);
//! ```
//!
//! # Transitions
//!
//! Every mutator ([`Theme::set_colors`], [`Theme::rotate_mode`],
//! [`Theme::push_random_color`], ...) computes a candidate palette from
//! [`Theme::active_palette`] and installs it as the target. Each subsequent
//! [`Theme::tick`] blends the working colors a fraction of the way toward the target's
//! scale. The approach is geometric, so the blend never overshoots and never lands
//! exactly; the transition completes once the average CIEDE2000 distance stops changing.
//!
//! # Subscribing to changes
//!
//! [`Theme::subscribe`] registers a callback that receives a [`ThemeUpdateEvent`] after
//! each accepted palette change, each completed transition, and each brightness change.

#![cfg_attr(test, allow(clippy::float_cmp))]
// Production library code must not use `.unwrap()` in functions returning `Result`. Tests
// are allowed to use .unwrap() (workspace `Cargo.toml` config allows it). The cfg_attr
// below only applies the deny to non-test builds.
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod color_math;
pub mod color_palette;
pub mod common;
pub mod theme;

// Re-export.
pub use color_math::*;
pub use color_palette::*;
pub use common::*;
pub use theme::*;
