// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The mutable side of the crate: a [`Theme`] that an animation loop reads colors from
//! every frame, and that cross-fades to new palettes one [`Theme::tick`] at a time.
//!
//! ## Organization:
//! - `theme_config` - [`ThemeConfig`], [`ColorUpdateConfig`], and the random options
//! - `theme_struct` - [`Theme`] and its transition logic
//! - `theme_subscribers` - [`SubscriberList`], the callback registry
//! - `theme_update_event` - [`ThemeUpdateEvent`], what subscribers receive

// Attach sources.
pub mod theme_config;
pub mod theme_struct;
pub mod theme_subscribers;
pub mod theme_update_event;

// Re-export.
pub use theme_config::*;
pub use theme_struct::*;
pub use theme_subscribers::*;
pub use theme_update_event::*;
