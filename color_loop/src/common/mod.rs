// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Enable or disable debug logging for palette transitions and randomization fallbacks.
/// The events are emitted via [`tracing`], so they only show up if the embedding
/// application has installed a subscriber.
pub const DEBUG_COLOR_LOOP: bool = true;

// Attach sources.
pub mod common_math;
pub mod common_result_and_error;
pub mod decl_macros;

// Re-export.
pub use common_math::*;
pub use common_result_and_error::*;
