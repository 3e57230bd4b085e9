// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod choice_types;
pub mod normalize;

// Re-export.
pub use choice_types::*;
pub use normalize::*;
